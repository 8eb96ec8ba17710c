//! Format conversion utilities
//!
//! - LOC (binary) → text - export for editing
//! - text → LOC (binary) - import, using the original LOC as a template

pub mod loc;

pub use loc::{
    CodecOptions, convert_loc_to_text, convert_loc_to_text_with_progress, convert_text_to_loc,
    convert_text_to_loc_with_progress, from_text, to_text,
};

/// Phase of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    /// Reading the source file(s)
    ReadingSource,
    /// Parsing the text document
    Parsing,
    /// Converting chunks
    Converting,
    /// Writing the destination file
    WritingOutput,
    /// Conversion complete
    Complete,
}

impl ConvertPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingSource => "Reading source",
            Self::Parsing => "Parsing",
            Self::Converting => "Converting",
            Self::WritingOutput => "Writing output",
            Self::Complete => "Complete",
        }
    }
}

/// Progress update sent during a conversion
#[derive(Debug, Clone)]
pub struct ConvertProgress {
    /// Current phase
    pub phase: ConvertPhase,
    /// Current step (1-indexed)
    pub current: usize,
    /// Total number of steps
    pub total: usize,
    /// Description of the current step
    pub message: Option<String>,
}

impl ConvertProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: ConvertPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            message: None,
        }
    }

    /// Create a progress update with a message
    #[must_use]
    pub fn with_message(
        phase: ConvertPhase,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            message: Some(message.into()),
        }
    }
}

/// Progress callback type for conversion operations
pub type ConvertProgressCallback<'a> = &'a dyn Fn(&ConvertProgress);
