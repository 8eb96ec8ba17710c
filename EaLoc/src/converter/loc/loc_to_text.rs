//! LOC to text conversion

use std::path::Path;

use super::CodecOptions;
use crate::error::{Error, Result};
use crate::formats::encoding::Decoded;
use crate::formats::loc::{self, LocFile};
use crate::formats::text::{TextDocument, TextSection};
use crate::formats::{ControlCodeTable, TextEncoding};
use crate::utils::write_atomic;

/// Convert a .loc file to the text format
///
/// # Errors
/// Returns an error if reading, decoding or writing fails. Nothing is written
/// to `dest` on failure.
pub fn convert_loc_to_text<P: AsRef<Path>>(source: P, dest: P, options: &CodecOptions) -> Result<()> {
    convert_loc_to_text_with_progress(source, dest, options, &|_| {})
}

/// Convert a .loc file to the text format with progress callback
///
/// # Errors
/// Returns an error if reading, decoding or writing fails. Nothing is written
/// to `dest` on failure.
pub fn convert_loc_to_text_with_progress<P: AsRef<Path>>(
    source: P,
    dest: P,
    options: &CodecOptions,
    progress: crate::converter::ConvertProgressCallback,
) -> Result<()> {
    use crate::converter::{ConvertPhase, ConvertProgress};

    tracing::info!(
        "Converting LOC→text: {:?} → {:?} ({})",
        source.as_ref(),
        dest.as_ref(),
        options.encoding
    );

    progress(&ConvertProgress::with_message(
        ConvertPhase::ReadingSource,
        1,
        3,
        "Reading LOC file...",
    ));
    let file = loc::read_loc(&source)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::Converting,
        2,
        3,
        format!(
            "Decoding {} strings in {} chunks...",
            file.string_count(),
            file.chunks.len()
        ),
    ));
    let document = to_text(&file, &options.control_codes, options.encoding)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::WritingOutput,
        3,
        3,
        "Writing text file...",
    ));
    write_atomic(dest, document.render().as_bytes())?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 3, 3));
    tracing::info!("Conversion complete");
    Ok(())
}

/// Convert a parsed `LocFile` to a text document
///
/// # Errors
/// Returns [`Error::Decode`] for the first string that cannot be decoded even
/// after trimming trailing bytes; no partial document is returned.
pub fn to_text(
    file: &LocFile,
    table: &ControlCodeTable,
    encoding: TextEncoding,
) -> Result<TextDocument> {
    let mut document = TextDocument::new();

    for chunk in &file.chunks {
        let mut section = TextSection::new(chunk.section_id());

        for (s, raw) in chunk.strings.iter().enumerate() {
            let decoded = decode_string(raw, table, encoding).ok_or(Error::Decode {
                chunk: chunk.index,
                string: s,
                encoding,
            })?;
            if decoded.trimmed > 0 {
                tracing::warn!(
                    "Chunk {} string {s}: dropped {} trailing byte(s) not valid in {encoding}",
                    chunk.index,
                    decoded.trimmed
                );
            }
            section.push(chunk.string_key(s), decoded.text);
        }

        tracing::debug!("{}: {} strings", section.id, section.entries.len());
        document.sections.push(section);
    }

    Ok(document)
}

/// Turn one raw string payload into text.
///
/// Control sequences become placeholder tokens, the bytes are decoded with
/// trailing-byte recovery, and trailing NULs are stripped.
#[must_use]
pub fn decode_string(
    raw: &[u8],
    table: &ControlCodeTable,
    encoding: TextEncoding,
) -> Option<Decoded> {
    let escaped = table.encode(raw, encoding);
    let mut decoded = encoding.decode_trimmed(&escaped)?;
    let kept = decoded.text.trim_end_matches('\0').len();
    decoded.text.truncate(kept);
    Some(decoded)
}
