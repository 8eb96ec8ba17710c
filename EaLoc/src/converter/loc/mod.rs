//! LOC and text localization format conversions
//!
//! Handles conversions between:
//! - LOC (binary) - chunked localization container shipped with the game
//! - Text - sectioned `key=value` file for editing

mod loc_to_text;
mod text_to_loc;

pub use loc_to_text::{
    convert_loc_to_text, convert_loc_to_text_with_progress, decode_string, to_text,
};
pub use text_to_loc::{
    convert_text_to_loc, convert_text_to_loc_with_progress, encode_value, from_text,
};

use crate::formats::{ChunkLayout, ControlCodeTable, TextEncoding};

/// Settings shared by export and import.
///
/// # Example
///
/// ```
/// use ealoc::converter::CodecOptions;
/// use ealoc::formats::{ChunkLayout, TextEncoding};
///
/// let options = CodecOptions::new()
///     .with_encoding(TextEncoding::Latin1)
///     .with_layout(ChunkLayout::Recompute);
/// assert_eq!(options.encoding, TextEncoding::Latin1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Encoding of the LOC string payloads
    pub encoding: TextEncoding,
    /// Control-code placeholders
    pub control_codes: ControlCodeTable,
    /// Import only: how chunk headers are rebuilt
    pub layout: ChunkLayout,
}

impl CodecOptions {
    /// UTF-8, built-in control codes, placeholder chunk layout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_control_codes(mut self, table: ControlCodeTable) -> Self {
        self.control_codes = table;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ChunkLayout) -> Self {
        self.layout = layout;
        self
    }
}
