//! Text to LOC conversion

use std::path::Path;

use super::CodecOptions;
use crate::error::{Error, Result};
use crate::formats::loc::{self, LocChunk, LocFile};
use crate::formats::text::TextDocument;
use crate::formats::{ControlCodeTable, TextEncoding};

/// Convert a text file back to .loc format
///
/// `template` is the original LOC file; its header and index block are copied
/// into the output. `template` and `dest` may be the same path.
///
/// # Errors
/// Returns an error if reading, encoding or writing fails. `dest` is left
/// untouched on failure.
pub fn convert_text_to_loc<P: AsRef<Path>>(
    source: P,
    template: P,
    dest: P,
    options: &CodecOptions,
) -> Result<()> {
    convert_text_to_loc_with_progress(source, template, dest, options, &|_| {})
}

/// Convert a text file back to .loc format with progress callback
///
/// # Errors
/// Returns an error if reading, encoding or writing fails. `dest` is left
/// untouched on failure.
pub fn convert_text_to_loc_with_progress<P: AsRef<Path>>(
    source: P,
    template: P,
    dest: P,
    options: &CodecOptions,
    progress: crate::converter::ConvertProgressCallback,
) -> Result<()> {
    use crate::converter::{ConvertPhase, ConvertProgress};

    tracing::info!(
        "Converting text→LOC: {:?} → {:?} (template {:?}, {}, {:?} layout)",
        source.as_ref(),
        dest.as_ref(),
        template.as_ref(),
        options.encoding,
        options.layout
    );

    progress(&ConvertProgress::with_message(
        ConvertPhase::ReadingSource,
        1,
        4,
        "Reading template LOC file...",
    ));
    let template_bytes = std::fs::read(&template)?;
    let template = loc::parse_loc_template(&template_bytes)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::Parsing,
        2,
        4,
        "Parsing text document...",
    ));
    let document = TextDocument::read(&source)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::Converting,
        3,
        4,
        format!(
            "Encoding {} strings in {} sections...",
            document.entry_count(),
            document.sections.len()
        ),
    ));
    let file = from_text(&document, &template, &options.control_codes, options.encoding)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::WritingOutput,
        4,
        4,
        "Writing LOC file...",
    ));
    loc::write_loc(dest, &file, options.layout)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 4, 4));
    tracing::info!("Conversion complete");
    Ok(())
}

/// Build a `LocFile` from a text document.
///
/// Sections map to chunks and entries to strings, both in document order.
/// Header and index come from `template`; each chunk takes the template's
/// language ID at the same position, or 0 past its end.
///
/// # Errors
/// Returns [`Error::Encode`] for the first value the encoding cannot represent.
pub fn from_text(
    document: &TextDocument,
    template: &LocFile,
    table: &ControlCodeTable,
    encoding: TextEncoding,
) -> Result<LocFile> {
    if document.sections.len() != template.chunks.len() {
        tracing::warn!(
            "Text has {} sections but the template header lists {} chunks",
            document.sections.len(),
            template.chunks.len()
        );
    }

    let chunks = document
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let strings = section
                .entries
                .iter()
                .map(|entry| encode_value(&entry.key, &entry.value, table, encoding))
                .collect::<Result<Vec<_>>>()?;

            Ok(LocChunk {
                index: i,
                chunk_size: 0,
                language_id: template.chunks.get(i).map_or(0, |c| c.language_id),
                strings,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LocFile {
        header: template.header.clone(),
        index: template.index.clone(),
        chunks,
    })
}

/// Turn one text value into its raw string payload.
///
/// The value is encoded strictly, then placeholder tokens are swapped back
/// for their control sequences.
///
/// # Errors
/// Returns [`Error::Encode`] if the value holds a character the encoding
/// cannot represent.
pub fn encode_value(
    key: &str,
    value: &str,
    table: &ControlCodeTable,
    encoding: TextEncoding,
) -> Result<Vec<u8>> {
    let bytes = encoding.encode(value).map_err(|character| Error::Encode {
        key: key.to_string(),
        encoding,
        character,
    })?;
    Ok(table.decode(&bytes, encoding))
}
