//! `.loc` file writing

use std::io::Write;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{CHUNK_HEADER_SIZE, LOCL_SIGNATURE, LocChunk, LocFile};
use crate::error::{Error, Result};
use crate::utils::write_atomic;

/// How chunk headers and string offsets are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkLayout {
    /// Single forward pass matching the original tool: header and index copied
    /// verbatim, chunk size and language ID written as 0, string offsets
    /// written as `chunk_start + 4 * count + cumulative`.
    #[default]
    Placeholder,
    /// True chunk sizes, language IDs carried from the model, offsets relative
    /// to the chunk base, and the header's chunk offset table patched to match.
    Recompute,
}

/// Write a .loc file to disk
///
/// The file is written to a temporary sibling first and renamed into place.
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_loc<P: AsRef<Path>>(path: P, file: &LocFile, layout: ChunkLayout) -> Result<()> {
    let bytes = write_loc_bytes(file, layout)?;
    write_atomic(path, &bytes)
}

/// Serialize a [`LocFile`] to bytes
///
/// # Errors
/// Returns [`Error::ChunkCountMismatch`] in [`ChunkLayout::Recompute`] mode when
/// the chunk count differs from the header's offset table, and
/// [`Error::OffsetOverflow`] if an offset does not fit in 32 bits.
pub fn write_loc_bytes(file: &LocFile, layout: ChunkLayout) -> Result<Vec<u8>> {
    match layout {
        ChunkLayout::Placeholder => write_placeholder(file),
        ChunkLayout::Recompute => write_recomputed(file),
    }
}

fn write_placeholder(file: &LocFile) -> Result<Vec<u8>> {
    let mut out = file.preamble_bytes();

    for chunk in &file.chunks {
        let chunk_start = out.len() as u64;
        let table_len = 4 * chunk.strings.len() as u64;

        out.write_all(&LOCL_SIGNATURE)?;
        out.write_u32::<LittleEndian>(0)?; // chunk size
        out.write_u32::<LittleEndian>(0)?; // language ID
        out.write_u32::<LittleEndian>(to_u32(chunk.strings.len() as u64)?)?;

        let mut cumulative = 0u64;
        for string in &chunk.strings {
            out.write_u32::<LittleEndian>(to_u32(chunk_start + table_len + cumulative)?)?;
            cumulative += string.len() as u64;
        }
        for string in &chunk.strings {
            out.write_all(string)?;
        }
    }

    Ok(out)
}

fn write_recomputed(file: &LocFile) -> Result<Vec<u8>> {
    if file.chunks.len() != file.header.chunk_offsets.len() {
        return Err(Error::ChunkCountMismatch {
            header: file.header.chunk_offsets.len(),
            text: file.chunks.len(),
        });
    }

    let sizes: Vec<u64> = file.chunks.iter().map(chunk_len).collect();

    let mut header = file.header.clone();
    let index_len = file.index.as_ref().map_or(0, |i| i.as_bytes().len());
    let mut position = (header.byte_len() + index_len) as u64;
    for (slot, size) in header.chunk_offsets.iter_mut().zip(&sizes) {
        *slot = to_u32(position)?;
        position += size;
    }

    let mut out = Vec::with_capacity(position as usize);
    out.extend_from_slice(&header.to_bytes());
    if let Some(index) = &file.index {
        out.extend_from_slice(index.as_bytes());
    }

    for (chunk, &size) in file.chunks.iter().zip(&sizes) {
        let table_end = (CHUNK_HEADER_SIZE + 4 * chunk.strings.len()) as u64;

        out.write_all(&LOCL_SIGNATURE)?;
        out.write_u32::<LittleEndian>(to_u32(size)?)?;
        out.write_u32::<LittleEndian>(chunk.language_id)?;
        out.write_u32::<LittleEndian>(to_u32(chunk.strings.len() as u64)?)?;

        let mut relative = table_end;
        for string in &chunk.strings {
            out.write_u32::<LittleEndian>(to_u32(relative)?)?;
            relative += string.len() as u64;
        }
        for string in &chunk.strings {
            out.write_all(string)?;
        }
    }

    Ok(out)
}

/// Size of a chunk on disk, header included
fn chunk_len(chunk: &LocChunk) -> u64 {
    (CHUNK_HEADER_SIZE + 4 * chunk.strings.len() + chunk.payload_len()) as u64
}

fn to_u32(value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::OffsetOverflow { offset: value })
}
