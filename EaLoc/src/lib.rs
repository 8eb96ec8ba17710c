//! # EaLoc
//!
//! A pure-Rust codec for EA `.loc` localization containers.
//!
//! ## Supported Conversions
//!
//! - **LOC → text** - export every language chunk to an editable `key=value` file
//! - **text → LOC** - rebuild the binary container, using the original file as a template
//!
//! String payloads can be UTF-8, UTF-16LE or Latin-1. Control bytes embedded in
//! strings (icon and colour codes and the like) are shown as placeholder tokens
//! such as `[CTRL_1F]` and restored on import.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ealoc::converter::{CodecOptions, convert_loc_to_text, convert_text_to_loc};
//!
//! let options = CodecOptions::new();
//!
//! // Export
//! convert_loc_to_text("strings.loc", "strings.txt", &options)?;
//!
//! // Import, overwriting the template
//! convert_text_to_loc("strings.txt", "strings.loc", "strings.loc", &options)?;
//! # Ok::<(), ealoc::Error>(())
//! ```
//!
//! ### Working in Memory
//!
//! ```
//! use ealoc::prelude::*;
//!
//! let table = ControlCodeTable::builtin();
//! let raw = encode_value("KEY", "Press [CTRL_1F]", &table, TextEncoding::Utf8)?;
//! assert_eq!(raw, b"Press \x1f");
//! # Ok::<(), ealoc::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `ealoc` command-line binary

pub mod converter;
pub mod error;
pub mod formats;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::{
        ChunkLayout, ControlCode, ControlCodeTable, LocChunk, LocFile, LocHeader, TextDocument,
        TextEncoding, TextSection,
    };
    pub use crate::formats::loc::{parse_loc_bytes, read_loc, write_loc, write_loc_bytes};

    pub use crate::converter;
    pub use crate::converter::loc::{decode_string, encode_value};
    pub use crate::converter::{
        CodecOptions, ConvertPhase, ConvertProgress, convert_loc_to_text, convert_text_to_loc,
        from_text, to_text,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
