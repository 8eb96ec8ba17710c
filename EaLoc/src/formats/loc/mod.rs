//! EA `.loc` localization container format
//!
//! A LOC file is a `LOCH` header holding a table of chunk base offsets, an
//! optional `LOCI` index block, and one `LOCL` chunk per language. Each chunk
//! stores a string-offset table followed by the concatenated string bytes;
//! string lengths are never stored and are recovered from neighbouring offsets.
//!
//! ```text
//! Header:  "LOCH" | chunkSize:u32 | flags:u32 | chunkCount:u32 | baseOffset:u32 * chunkCount
//! Index:   "LOCI" | size:u32 | entryCount:u32 | reserved:u32 | (u16, u16) * entryCount
//! Chunk:   "LOCL" | chunkSize:u32 | languageId:u32 | stringCount:u32 | offset:u32 * stringCount | bytes
//! ```
//!
//! All integers are little-endian.

mod cursor;
mod reader;
mod writer;

pub use cursor::BinaryCursor;
pub use reader::{parse_loc_bytes, parse_loc_template, read_loc, string_ranges};
pub use writer::{ChunkLayout, write_loc, write_loc_bytes};

/// "LOCH" header signature
pub const LOCH_SIGNATURE: [u8; 4] = *b"LOCH";

/// "LOCI" index block signature
pub const LOCI_SIGNATURE: [u8; 4] = *b"LOCI";

/// "LOCL" language chunk signature
pub const LOCL_SIGNATURE: [u8; 4] = *b"LOCL";

/// Header flag: a `LOCI` block follows the header
pub const FLAG_HAS_INDEX: u32 = 0x1;

/// Size of the fixed part of the header (signature, size, flags, count)
pub const HEADER_FIXED_SIZE: usize = 16;

/// Size of a chunk header (signature, size, language ID, string count)
pub const CHUNK_HEADER_SIZE: usize = 16;

/// Size of the fixed part of the index block (signature, size, count, reserved)
pub const INDEX_FIXED_SIZE: usize = 16;

/// The `LOCH` header block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocHeader {
    /// Declared block size; read but not interpreted
    pub chunk_size: u32,
    /// Bitmask, see [`FLAG_HAS_INDEX`]
    pub flags: u32,
    /// Absolute file offset of each language chunk
    pub chunk_offsets: Vec<u32>,
}

impl LocHeader {
    #[must_use]
    pub fn has_index(&self) -> bool {
        self.flags & FLAG_HAS_INDEX != 0
    }

    /// Size of the header on disk
    #[must_use]
    pub fn byte_len(&self) -> usize {
        HEADER_FIXED_SIZE + 4 * self.chunk_offsets.len()
    }

    /// Serialize the header exactly as it was read
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        out.extend_from_slice(&LOCH_SIGNATURE);
        out.extend_from_slice(&self.chunk_size.to_le_bytes());
        out.extend_from_slice(&self.flags.to_le_bytes());
        out.extend_from_slice(&(self.chunk_offsets.len() as u32).to_le_bytes());
        for offset in &self.chunk_offsets {
            out.extend_from_slice(&offset.to_le_bytes());
        }
        out
    }
}

/// The optional `LOCI` block, kept as opaque bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocIndexBlock {
    raw: Vec<u8>,
}

impl LocIndexBlock {
    /// Wrap the raw block bytes, signature included
    #[must_use]
    pub fn from_raw(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    /// The block exactly as stored in the file
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Declared entry count, if the block is long enough to hold one
    #[must_use]
    pub fn entry_count(&self) -> Option<u32> {
        self.raw
            .get(8..12)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
    }

    /// Decode the `(u16, u16)` entries that fit inside the block
    #[must_use]
    pub fn entries(&self) -> Vec<(u16, u16)> {
        let count = self.entry_count().unwrap_or(0);
        let mut cursor = BinaryCursor::new(&self.raw);
        cursor.seek(INDEX_FIXED_SIZE as u64);
        (0..count)
            .map_while(|_| Some((cursor.read_u16().ok()?, cursor.read_u16().ok()?)))
            .collect()
    }
}

/// One `LOCL` language chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocChunk {
    /// Position of the chunk in the file, 0-based
    pub index: usize,
    /// Declared chunk size as read; 0 for chunks built from text
    pub chunk_size: u32,
    /// Language ID field as read; 0 for chunks built from text
    pub language_id: u32,
    /// Raw string payloads in file order
    pub strings: Vec<Vec<u8>>,
}

impl LocChunk {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Section identifier used in the text form, e.g. `LOCL_CHUNK_0`
    #[must_use]
    pub fn section_id(&self) -> String {
        section_id(self.index)
    }

    /// Key of a string in the text form, e.g. `LOCL_CHUNK_0_STRING_1`
    #[must_use]
    pub fn string_key(&self, string: usize) -> String {
        format!("{}_STRING_{string}", self.section_id())
    }

    /// Total payload bytes of all strings
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.strings.iter().map(Vec::len).sum()
    }
}

/// Section identifier for chunk `index`
#[must_use]
pub fn section_id(index: usize) -> String {
    format!("LOCL_CHUNK_{index}")
}

/// A parsed LOC file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocFile {
    pub header: LocHeader,
    pub index: Option<LocIndexBlock>,
    /// Language chunks in on-disk order
    pub chunks: Vec<LocChunk>,
}

impl LocFile {
    #[must_use]
    pub fn flags(&self) -> u32 {
        self.header.flags
    }

    /// Header and index bytes, which the encoder copies through unchanged
    #[must_use]
    pub fn preamble_bytes(&self) -> Vec<u8> {
        let mut out = self.header.to_bytes();
        if let Some(index) = &self.index {
            out.extend_from_slice(index.as_bytes());
        }
        out
    }

    /// Total number of strings across all chunks
    #[must_use]
    pub fn string_count(&self) -> usize {
        self.chunks.iter().map(|c| c.strings.len()).sum()
    }
}
