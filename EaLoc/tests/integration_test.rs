//! End-to-end tests for LOC export and import

use std::fs;
use std::path::Path;

use ealoc::Error;
use ealoc::converter::{CodecOptions, convert_loc_to_text, convert_text_to_loc, from_text, to_text};
use ealoc::formats::loc::{parse_loc_bytes, parse_loc_template, write_loc_bytes};
use ealoc::formats::{ChunkLayout, ControlCodeTable, TextDocument, TextEncoding};
use pretty_assertions::assert_eq;

const LANGUAGE_ID: u32 = 0x409;

/// Build a LOC buffer the way the game tools lay it out: chunks follow the
/// header (and index), string offsets are relative to each chunk's base.
fn build_loc(chunks: &[Vec<Vec<u8>>], with_index: bool) -> Vec<u8> {
    let header_len = 16 + 4 * chunks.len();
    let index_len = if with_index { 24 } else { 0 };

    let chunk_lens: Vec<usize> = chunks
        .iter()
        .map(|strings| 16 + 4 * strings.len() + strings.iter().map(Vec::len).sum::<usize>())
        .collect();

    let mut data = b"LOCH".to_vec();
    data.extend_from_slice(&(header_len as u32).to_le_bytes());
    data.extend_from_slice(&u32::from(with_index).to_le_bytes());
    data.extend_from_slice(&(chunks.len() as u32).to_le_bytes());
    let mut position = header_len + index_len;
    for len in &chunk_lens {
        data.extend_from_slice(&(position as u32).to_le_bytes());
        position += len;
    }

    if with_index {
        data.extend_from_slice(b"LOCI");
        data.extend_from_slice(&24u32.to_le_bytes());
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&[0, 0, 1, 0, 1, 0, 2, 0]);
    }

    for (strings, len) in chunks.iter().zip(&chunk_lens) {
        data.extend_from_slice(b"LOCL");
        data.extend_from_slice(&(*len as u32).to_le_bytes());
        data.extend_from_slice(&LANGUAGE_ID.to_le_bytes());
        data.extend_from_slice(&(strings.len() as u32).to_le_bytes());
        let mut relative = 16 + 4 * strings.len();
        for s in strings {
            data.extend_from_slice(&(relative as u32).to_le_bytes());
            relative += s.len();
        }
        for s in strings {
            data.extend_from_slice(s);
        }
    }

    data
}

fn strings(values: &[&str]) -> Vec<Vec<u8>> {
    values.iter().map(|v| v.as_bytes().to_vec()).collect()
}

fn sample_chunk_sets() -> Vec<Vec<Vec<Vec<u8>>>> {
    vec![
        vec![strings(&[])],
        vec![strings(&["Hello", "World"])],
        vec![
            strings(&["One", "", "Three", "Four", "Five"]),
            strings(&["Eins"]),
        ],
        vec![
            strings(&["a"]),
            strings(&[]),
            strings(&["x=y", "Quest: [Name]", "100%", "tab\tin", "end"]),
        ],
    ]
}

fn write_file(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn test_export_hello_world() {
    let dir = tempfile::tempdir().unwrap();
    let loc = write_file(dir.path(), "strings.loc", &build_loc(&[strings(&["Hello", "World"])], false));
    let text = dir.path().join("strings.txt");

    convert_loc_to_text(&loc, &text, &CodecOptions::new()).unwrap();

    assert_eq!(
        fs::read_to_string(&text).unwrap(),
        "[LOCL_CHUNK_0]\n\
         LOCL_CHUNK_0_STRING_0=Hello\n\
         LOCL_CHUNK_0_STRING_1=World\n"
    );
}

#[test]
fn test_placeholder_round_trip_keeps_preamble_and_strings() {
    let table = ControlCodeTable::builtin();

    for with_index in [false, true] {
        for chunks in sample_chunk_sets() {
            let original = build_loc(&chunks, with_index);
            let parsed = parse_loc_bytes(&original).unwrap();
            let document = to_text(&parsed, &table, TextEncoding::Utf8).unwrap();

            let reparsed_text = TextDocument::parse(&document.render()).unwrap();
            let template = parse_loc_template(&original).unwrap();
            let rebuilt = from_text(&reparsed_text, &template, &table, TextEncoding::Utf8).unwrap();
            let bytes = write_loc_bytes(&rebuilt, ChunkLayout::Placeholder).unwrap();

            let preamble = parsed.preamble_bytes();
            assert_eq!(&bytes[..preamble.len()], preamble.as_slice());

            let rebuilt_strings: Vec<_> = rebuilt.chunks.iter().map(|c| c.strings.clone()).collect();
            assert_eq!(rebuilt_strings, chunks);
        }
    }
}

#[test]
fn test_recompute_round_trip_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let options = CodecOptions::new().with_layout(ChunkLayout::Recompute);

    for (n, chunks) in sample_chunk_sets().into_iter().enumerate() {
        let original = build_loc(&chunks, n % 2 == 1);
        let loc = write_file(dir.path(), &format!("{n}.loc"), &original);
        let text = dir.path().join(format!("{n}.txt"));
        let rebuilt = dir.path().join(format!("{n}.rebuilt.loc"));

        convert_loc_to_text(&loc, &text, &options).unwrap();
        convert_text_to_loc(&text, &loc, &rebuilt, &options).unwrap();

        assert_eq!(fs::read(&rebuilt).unwrap(), original);
    }
}

#[test]
fn test_placeholder_layout_bytes() {
    let original = build_loc(&[strings(&["Hi", "Yo"])], false);
    let table = ControlCodeTable::builtin();
    let template = parse_loc_template(&original).unwrap();
    let document = TextDocument::parse("[LOCL_CHUNK_0]\nK0=Hi\nK1=Yo\n").unwrap();
    let file = from_text(&document, &template, &table, TextEncoding::Utf8).unwrap();
    let bytes = write_loc_bytes(&file, ChunkLayout::Placeholder).unwrap();

    // Chunk starts right after the 20-byte header
    let chunk = &bytes[20..];
    let word = |i: usize| u32::from_le_bytes(chunk[i..i + 4].try_into().unwrap());
    assert_eq!(&chunk[..4], b"LOCL");
    assert_eq!(word(4), 0);
    assert_eq!(word(8), 0);
    assert_eq!(word(12), 2);
    assert_eq!(word(16), 20 + 8);
    assert_eq!(word(20), 20 + 8 + 2);
    assert_eq!(&chunk[24..], b"HiYo");
}

#[test]
fn test_import_overwrites_template_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let loc = write_file(dir.path(), "strings.loc", &build_loc(&[strings(&["Hello"])], false));
    let text = write_file(dir.path(), "strings.txt", b"[LOCL_CHUNK_0]\nLOCL_CHUNK_0_STRING_0=Bonjour\n");
    let options = CodecOptions::new().with_layout(ChunkLayout::Recompute);

    convert_text_to_loc(&text, &loc, &loc, &options).unwrap();

    let file = parse_loc_bytes(&fs::read(&loc).unwrap()).unwrap();
    assert_eq!(file.chunks[0].strings, vec![b"Bonjour".to_vec()]);
    assert_eq!(file.chunks[0].language_id, LANGUAGE_ID);
}

#[test]
fn test_newline_preserved_as_escape() {
    let dir = tempfile::tempdir().unwrap();
    let original = build_loc(&[strings(&["Line one\nLine two", "C:\\path"])], false);
    let loc = write_file(dir.path(), "strings.loc", &original);
    let text = dir.path().join("strings.txt");
    let rebuilt = dir.path().join("rebuilt.loc");
    let options = CodecOptions::new().with_layout(ChunkLayout::Recompute);

    convert_loc_to_text(&loc, &text, &options).unwrap();
    let exported = fs::read_to_string(&text).unwrap();
    assert!(exported.contains("LOCL_CHUNK_0_STRING_0=Line one\\nLine two\n"));
    assert!(exported.contains("LOCL_CHUNK_0_STRING_1=C:\\\\path\n"));

    convert_text_to_loc(&text, &loc, &rebuilt, &options).unwrap();
    assert_eq!(fs::read(&rebuilt).unwrap(), original);
}

#[test]
fn test_decode_retry_trims_one_byte() {
    let original = build_loc(&[vec![b"Caf\xc3".to_vec()]], false);
    let file = parse_loc_bytes(&original).unwrap();

    let document = to_text(&file, &ControlCodeTable::builtin(), TextEncoding::Utf8).unwrap();
    assert_eq!(document.sections[0].entries[0].value, "Caf");
}

#[test]
fn test_bad_signature_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let loc = write_file(dir.path(), "broken.loc", b"LOCX\x14\0\0\0\0\0\0\0\0\0\0\0");
    let text = dir.path().join("broken.txt");

    let err = convert_loc_to_text(&loc, &text, &CodecOptions::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidSignature { expected: "LOCH", .. }));
    assert!(!text.exists());
}

#[test]
fn test_failed_import_leaves_destination_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let original = build_loc(&[strings(&["Hello"])], false);
    let loc = write_file(dir.path(), "strings.loc", &original);
    let text = write_file(dir.path(), "strings.txt", "[LOCL_CHUNK_0]\nK=\u{4e2d}\n".as_bytes());
    let options = CodecOptions::new().with_encoding(TextEncoding::Latin1);

    let err = convert_text_to_loc(&text, &loc, &loc, &options).unwrap_err();
    assert!(matches!(err, Error::Encode { character: '\u{4e2d}', .. }));
    assert_eq!(fs::read(&loc).unwrap(), original);
}

#[test]
fn test_recompute_rejects_extra_sections() {
    let dir = tempfile::tempdir().unwrap();
    let loc = write_file(dir.path(), "strings.loc", &build_loc(&[strings(&["A"])], false));
    let text = write_file(dir.path(), "strings.txt", b"[LOCL_CHUNK_0]\nK=A\n[LOCL_CHUNK_1]\nK=B\n");
    let out = dir.path().join("out.loc");
    let options = CodecOptions::new().with_layout(ChunkLayout::Recompute);

    let err = convert_text_to_loc(&text, &loc, &out, &options).unwrap_err();
    assert!(matches!(err, Error::ChunkCountMismatch { header: 1, text: 2 }));
    assert!(!out.exists());
}

#[test]
fn test_custom_control_codes() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{ "codes": [ { "raw": "1F01", "token": "[ICON_A]" }, { "raw": "1E", "token": "[END]" } ] }"#;
    let table_path = write_file(dir.path(), "codes.json", json.as_bytes());
    let table = ControlCodeTable::load(&table_path).unwrap();
    assert_eq!(table.len(), 2);

    let original = build_loc(&[vec![b"Press \x1f\x01 to \x1ejump".to_vec()]], false);
    let loc = write_file(dir.path(), "strings.loc", &original);
    let text = dir.path().join("strings.txt");
    let rebuilt = dir.path().join("rebuilt.loc");
    let options = CodecOptions::new()
        .with_control_codes(table)
        .with_layout(ChunkLayout::Recompute);

    convert_loc_to_text(&loc, &text, &options).unwrap();
    assert!(
        fs::read_to_string(&text)
            .unwrap()
            .contains("=Press [ICON_A] to [END]jump\n")
    );

    convert_text_to_loc(&text, &loc, &rebuilt, &options).unwrap();
    assert_eq!(fs::read(&rebuilt).unwrap(), original);
}

#[test]
fn test_utf16_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let wide = |s: &str| -> Vec<u8> { s.encode_utf16().flat_map(u16::to_le_bytes).collect() };
    let mut icon = wide("Go ");
    icon.extend_from_slice(&[0x1f, 0x00]);
    let original = build_loc(&[vec![wide("Grüße"), icon]], false);

    let loc = write_file(dir.path(), "strings.loc", &original);
    let text = dir.path().join("strings.txt");
    let rebuilt = dir.path().join("rebuilt.loc");
    // Single-byte codes never match whole UTF-16 code units
    let table = ControlCodeTable::new([(vec![0x1f, 0x00], "[CTRL_1F]")]).unwrap();
    let options = CodecOptions::new()
        .with_encoding(TextEncoding::Utf16)
        .with_control_codes(table)
        .with_layout(ChunkLayout::Recompute);

    convert_loc_to_text(&loc, &text, &options).unwrap();
    let exported = fs::read_to_string(&text).unwrap();
    assert!(exported.contains("LOCL_CHUNK_0_STRING_0=Grüße\n"));
    assert!(exported.contains("LOCL_CHUNK_0_STRING_1=Go [CTRL_1F]\n"));

    convert_text_to_loc(&text, &loc, &rebuilt, &options).unwrap();
    assert_eq!(fs::read(&rebuilt).unwrap(), original);
}
