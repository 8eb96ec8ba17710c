//! Error types for `EaLoc`

use thiserror::Error;

use crate::formats::encoding::TextEncoding;

/// The error type for `EaLoc` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The finished temporary output could not be moved over the destination.
    #[error("failed to persist output file: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),

    // ==================== LOC Format Errors ====================
    /// A block signature did not match (`LOCH`, `LOCI` or `LOCL`).
    #[error("invalid signature at offset {offset:#x}: expected {expected}, found {found:?}")]
    InvalidSignature {
        /// The signature that was expected at this position.
        expected: &'static str,
        /// The four bytes actually found.
        found: [u8; 4],
        /// Absolute file offset of the signature.
        offset: u64,
    },

    /// A read ran past the end of the buffer.
    #[error("truncated file: needed {needed} bytes at offset {offset:#x}, only {available} available")]
    TruncatedFile {
        /// Absolute offset where the read started.
        offset: u64,
        /// Number of bytes the read required.
        needed: u64,
        /// Number of bytes remaining in the buffer.
        available: u64,
    },

    /// A string's computed end offset lies before its start offset.
    #[error("invalid bounds for chunk {chunk} string {string}: start {start:#x}, end {end:#x}")]
    InvalidStringBounds {
        /// Chunk index.
        chunk: usize,
        /// String index within the chunk.
        string: usize,
        /// Absolute start offset.
        start: u64,
        /// Absolute end offset.
        end: u64,
    },

    /// The rebuilt file would need offsets beyond the 32-bit range.
    #[error("LOC output too large: offset {offset:#x} exceeds 32 bits")]
    OffsetOverflow {
        /// The offending offset.
        offset: u64,
    },

    // ==================== Text Encoding Errors ====================
    /// No amount of trailing-byte trimming made the string decodable.
    #[error("chunk {chunk} string {string} cannot be decoded as {encoding}")]
    Decode {
        /// Chunk index.
        chunk: usize,
        /// String index within the chunk.
        string: usize,
        /// The requested encoding.
        encoding: TextEncoding,
    },

    /// A text value holds a character the target encoding cannot represent.
    #[error("value of {key} cannot be encoded as {encoding}: unsupported character {character:?}")]
    Encode {
        /// Key of the offending text line.
        key: String,
        /// The requested encoding.
        encoding: TextEncoding,
        /// The first character that failed to encode.
        character: char,
    },

    // ==================== Text Document Errors ====================
    /// A non-comment, non-section line without a `=` separator.
    #[error("malformed line {line}: {content:?}")]
    MalformedTextLine {
        /// 1-based line number.
        line: usize,
        /// The line as read.
        content: String,
    },

    /// A `KEY=VALUE` line appeared before any `[SECTION]` header.
    #[error("line {line} has no enclosing [section]")]
    OrphanTextEntry {
        /// 1-based line number.
        line: usize,
    },

    /// Section count in the text document differs from the template LOC header.
    #[error("text document has {text} sections but the LOC header declares {header} chunks")]
    ChunkCountMismatch {
        /// Chunk count in the template header.
        header: usize,
        /// Section count in the text document.
        text: usize,
    },

    // ==================== Control Code Errors ====================
    /// The control-code table failed validation.
    #[error("invalid control-code table: {0}")]
    InvalidControlCodeTable(String),

    /// JSON parsing error (control-code table files).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `EaLoc` operations.
pub type Result<T> = std::result::Result<T, Error>;
