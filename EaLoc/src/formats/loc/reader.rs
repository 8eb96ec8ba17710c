//! `.loc` file reading and parsing

use std::ops::Range;
use std::path::Path;

use super::{
    BinaryCursor, LOCH_SIGNATURE, LOCI_SIGNATURE, LOCL_SIGNATURE, LocChunk, LocFile, LocHeader,
    LocIndexBlock,
};
use crate::error::{Error, Result};

/// Read a .loc file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, and any error
/// of [`parse_loc_bytes`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_loc<P: AsRef<Path>>(path: P) -> Result<LocFile> {
    let buffer = std::fs::read(path)?;
    parse_loc_bytes(&buffer)
}

/// Parse .loc data from bytes
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if a `LOCH`, `LOCI` or `LOCL` signature
/// does not match, [`Error::TruncatedFile`] if a read runs past the end of the
/// buffer, and [`Error::InvalidStringBounds`] if a string would end before it starts.
///
/// [`Error::InvalidSignature`]: crate::Error::InvalidSignature
/// [`Error::TruncatedFile`]: crate::Error::TruncatedFile
/// [`Error::InvalidStringBounds`]: crate::Error::InvalidStringBounds
pub fn parse_loc_bytes(data: &[u8]) -> Result<LocFile> {
    let mut cursor = BinaryCursor::new(data);

    let header = read_header(&mut cursor)?;
    let index = if header.has_index() {
        Some(read_index(&mut cursor)?)
    } else {
        None
    };

    let mut chunks = Vec::with_capacity(header.chunk_offsets.len());
    for (i, &base) in header.chunk_offsets.iter().enumerate() {
        chunks.push(read_chunk(&mut cursor, i, u64::from(base))?);
    }

    tracing::debug!(
        "Parsed LOC: {} chunks, {} strings, index block: {}",
        chunks.len(),
        chunks.iter().map(|c| c.strings.len()).sum::<usize>(),
        index.is_some()
    );

    Ok(LocFile {
        header,
        index,
        chunks,
    })
}

/// Parse only what the importer needs from an existing LOC file.
///
/// The header and index block are validated and kept. Chunks are returned
/// without strings; each carries the language ID found at its base offset, or
/// 0 when no `LOCL` block is found there. String tables are never walked, so
/// a file whose chunk sizes were zeroed by an earlier import still works as
/// a template.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] or [`Error::TruncatedFile`] if the
/// header or index block is invalid.
///
/// [`Error::InvalidSignature`]: crate::Error::InvalidSignature
/// [`Error::TruncatedFile`]: crate::Error::TruncatedFile
pub fn parse_loc_template(data: &[u8]) -> Result<LocFile> {
    let mut cursor = BinaryCursor::new(data);

    let header = read_header(&mut cursor)?;
    let index = if header.has_index() {
        Some(read_index(&mut cursor)?)
    } else {
        None
    };

    let chunks = header
        .chunk_offsets
        .iter()
        .enumerate()
        .map(|(i, &base)| {
            let mut chunk = LocChunk::new(i);
            cursor.seek(u64::from(base));
            let language = cursor
                .expect_signature(LOCL_SIGNATURE, "LOCL")
                .and_then(|()| cursor.read_u32())
                .and_then(|_| cursor.read_u32());
            match language {
                Ok(id) => chunk.language_id = id,
                Err(e) => tracing::debug!("No language ID for chunk {i}: {e}"),
            }
            chunk
        })
        .collect();

    Ok(LocFile {
        header,
        index,
        chunks,
    })
}

fn read_header(cursor: &mut BinaryCursor) -> Result<LocHeader> {
    cursor.expect_signature(LOCH_SIGNATURE, "LOCH")?;

    let chunk_size = cursor.read_u32()?;
    let flags = cursor.read_u32()?;
    let chunk_count = cursor.read_u32()?;
    let chunk_offsets = cursor.read_u32_array(chunk_count)?;

    Ok(LocHeader {
        chunk_size,
        flags,
        chunk_offsets,
    })
}

/// The declared size covers the whole block, signature included.
fn read_index(cursor: &mut BinaryCursor) -> Result<LocIndexBlock> {
    let start = cursor.tell();
    cursor.expect_signature(LOCI_SIGNATURE, "LOCI")?;
    let size = cursor.read_u32()?;

    // A size smaller than the signature and size fields still consumes them
    let len = u64::from(size).max(8);
    cursor.seek(start);
    let raw = cursor.read_bytes(len)?;

    Ok(LocIndexBlock::from_raw(raw))
}

fn read_chunk(cursor: &mut BinaryCursor, index: usize, base: u64) -> Result<LocChunk> {
    let locl_start = cursor.tell();
    if locl_start != base {
        tracing::warn!(
            "Chunk {index} starts at {locl_start:#x} but the header lists {base:#x}"
        );
    }

    cursor.expect_signature(LOCL_SIGNATURE, "LOCL")?;
    let chunk_size = cursor.read_u32()?;
    let language_id = cursor.read_u32()?;
    let string_count = cursor.read_u32()?;
    let relative_offsets = cursor.read_u32_array(string_count)?;

    let chunk_end = locl_start + u64::from(chunk_size);
    let ranges = string_ranges(base, &relative_offsets, chunk_end);

    let mut strings = Vec::with_capacity(ranges.len());
    for (s, range) in ranges.into_iter().enumerate() {
        if range.end < range.start {
            return Err(Error::InvalidStringBounds {
                chunk: index,
                string: s,
                start: range.start,
                end: range.end,
            });
        }
        cursor.seek(range.start);
        strings.push(cursor.read_bytes(range.end - range.start)?);
    }

    // Skip padding after the last string (or after the table of an empty chunk)
    if cursor.tell() < chunk_end {
        cursor.seek(chunk_end);
    }

    tracing::debug!(
        "Chunk {index}: {} strings, size {chunk_size}, language {language_id:#x}",
        strings.len()
    );

    Ok(LocChunk {
        index,
        chunk_size,
        language_id,
        strings,
    })
}

/// Absolute byte range of every string in a chunk.
///
/// Starts are `base + relative`; each string ends where the next begins, and
/// the last one ends at `chunk_end`. A range may come back inverted
/// (`end < start`) when the offsets are inconsistent; callers must check.
#[must_use]
pub fn string_ranges(base: u64, relative_offsets: &[u32], chunk_end: u64) -> Vec<Range<u64>> {
    let starts: Vec<u64> = relative_offsets
        .iter()
        .map(|&rel| base + u64::from(rel))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(s, &start)| {
            let end = starts.get(s + 1).copied().unwrap_or(chunk_end);
            start..end
        })
        .collect()
}
