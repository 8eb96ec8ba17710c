//! Control-code table
//!
//! Game strings embed non-text byte sequences (button icons, colour and
//! formatting markers). On export each sequence is swapped for a readable
//! placeholder token such as `[CTRL_1F]`; on import the token is swapped back.
//!
//! A table is an ordered list of `(raw, token)` pairs, validated once at
//! construction and then passed by reference into the converters.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "codes": [
//!     { "raw": "1F01", "token": "[ICON_A]" },
//!     { "raw": "1E",   "token": "[COLOR_END]" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::encoding::TextEncoding;

/// Longest raw sequence a table may map
pub const MAX_RAW_LEN: usize = 2;

/// One mapping between a raw byte sequence and its placeholder token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCode {
    raw: Vec<u8>,
    token: String,
    /// Token as UTF-16LE bytes
    token_wide: Vec<u8>,
}

impl ControlCode {
    /// The raw byte sequence
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The placeholder token
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    fn token_bytes(&self, encoding: TextEncoding) -> &[u8] {
        match encoding.unit_width() {
            2 => &self.token_wide,
            _ => self.token.as_bytes(),
        }
    }

    /// Raw sequences only apply when they cover whole code units
    fn applies_to(&self, encoding: TextEncoding) -> bool {
        self.raw.len() % encoding.unit_width() == 0
    }
}

/// On-disk representation of a table
#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    codes: Vec<TableEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TableEntry {
    /// Hex string, e.g. `"1F01"`
    raw: String,
    token: String,
}

/// Immutable bidirectional mapping between control sequences and tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCodeTable {
    codes: Vec<ControlCode>,
}

impl ControlCodeTable {
    /// Build a table from `(raw, token)` pairs.
    ///
    /// # Errors
    /// Returns [`Error::InvalidControlCodeTable`] if a raw sequence is empty or
    /// longer than [`MAX_RAW_LEN`], a token is empty or not printable ASCII, two
    /// raw sequences (or two tokens) are equal or one is a prefix of the other,
    /// or a raw sequence occurs inside a token.
    pub fn new<I, R, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (R, T)>,
        R: Into<Vec<u8>>,
        T: Into<String>,
    {
        let mut codes: Vec<ControlCode> = Vec::new();

        for (raw, token) in pairs {
            let raw = raw.into();
            let token = token.into();

            if raw.is_empty() || raw.len() > MAX_RAW_LEN {
                return Err(invalid(format!(
                    "raw sequence {} must be 1 to {MAX_RAW_LEN} bytes",
                    hex::encode_upper(&raw)
                )));
            }
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
                return Err(invalid(format!(
                    "token {token:?} must be non-empty printable ASCII"
                )));
            }

            for existing in &codes {
                if existing.raw.starts_with(&raw) || raw.starts_with(&existing.raw) {
                    return Err(invalid(format!(
                        "raw sequences {} and {} overlap",
                        hex::encode_upper(&existing.raw),
                        hex::encode_upper(&raw)
                    )));
                }
                if existing.token.starts_with(&token) || token.starts_with(&existing.token) {
                    return Err(invalid(format!(
                        "tokens {:?} and {token:?} overlap",
                        existing.token
                    )));
                }
            }

            let token_wide = token.encode_utf16().flat_map(u16::to_le_bytes).collect();
            codes.push(ControlCode {
                raw,
                token,
                token_wide,
            });
        }

        for code in &codes {
            if let Some(inner) = codes
                .iter()
                .find(|c| contains(c.token.as_bytes(), &code.raw))
            {
                return Err(invalid(format!(
                    "raw sequence {} occurs inside token {:?}",
                    hex::encode_upper(&code.raw),
                    inner.token
                )));
            }
        }

        Ok(Self { codes })
    }

    /// The default table: every C0 control byte except NUL, TAB, LF and CR,
    /// plus DEL, each mapped to `[CTRL_XX]`.
    #[must_use]
    pub fn builtin() -> Self {
        let codes = (0x01u8..=0x1F)
            .filter(|b| !matches!(b, b'\t' | b'\n' | b'\r'))
            .chain(std::iter::once(0x7F))
            .map(|b| {
                let token = format!("[CTRL_{b:02X}]");
                ControlCode {
                    raw: vec![b],
                    token_wide: token.encode_utf16().flat_map(u16::to_le_bytes).collect(),
                    token,
                }
            })
            .collect();
        Self { codes }
    }

    /// Parse a table from its JSON form.
    ///
    /// # Errors
    /// Returns [`Error::JsonError`] for malformed JSON and
    /// [`Error::InvalidControlCodeTable`] for bad hex or a table that fails validation.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: TableFile = serde_json::from_str(content)?;
        let pairs = file
            .codes
            .into_iter()
            .map(|entry| {
                let digits: String = entry.raw.chars().filter(|c| !c.is_whitespace()).collect();
                hex::decode(&digits)
                    .map(|raw| (raw, entry.token))
                    .map_err(|e| invalid(format!("raw sequence {:?}: {e}", entry.raw)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(pairs)
    }

    /// Load a table from a JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the table is invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize the table to pretty-printed JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let file = TableFile {
            codes: self
                .codes
                .iter()
                .map(|c| TableEntry {
                    raw: hex::encode_upper(&c.raw),
                    token: c.token.clone(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Iterate over the mappings in table order
    pub fn codes(&self) -> impl Iterator<Item = &ControlCode> {
        self.codes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Replace every raw control sequence with its token, rendered in `encoding`.
    #[must_use]
    pub fn encode(&self, raw: &[u8], encoding: TextEncoding) -> Vec<u8> {
        self.substitute(raw, encoding, |code| {
            (code.raw.as_slice(), code.token_bytes(encoding))
        })
    }

    /// Replace every token (rendered in `encoding`) with its raw control sequence.
    #[must_use]
    pub fn decode(&self, escaped: &[u8], encoding: TextEncoding) -> Vec<u8> {
        self.substitute(escaped, encoding, |code| {
            (code.token_bytes(encoding), code.raw.as_slice())
        })
    }

    /// Scan `input` at code-unit boundaries, swapping `from` for `to` per code.
    fn substitute<'a, F>(&'a self, input: &[u8], encoding: TextEncoding, pick: F) -> Vec<u8>
    where
        F: Fn(&'a ControlCode) -> (&'a [u8], &'a [u8]),
    {
        let unit = encoding.unit_width();
        let mut out = Vec::with_capacity(input.len());
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            let hit = self
                .codes
                .iter()
                .filter(|c| c.applies_to(encoding))
                .map(&pick)
                .find(|(from, _)| rest.starts_with(from));

            if let Some((from, to)) = hit {
                out.extend_from_slice(to);
                pos += from.len();
            } else {
                let step = unit.min(rest.len());
                out.extend_from_slice(&rest[..step]);
                pos += step;
            }
        }

        out
    }
}

impl Default for ControlCodeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidControlCodeTable(message)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_round_trip() {
        let table = ControlCodeTable::builtin();
        for code in table.codes() {
            let escaped = table.encode(code.raw(), TextEncoding::Utf8);
            assert_eq!(escaped, code.token().as_bytes());
            assert_eq!(table.decode(&escaped, TextEncoding::Utf8), code.raw());
            assert_eq!(table.encode(&table.decode(code.token().as_bytes(), TextEncoding::Utf8), TextEncoding::Utf8), code.token().as_bytes());
        }
    }

    #[test]
    fn test_builtin_covers_c0_and_del() {
        let table = ControlCodeTable::builtin();
        let raws: Vec<u8> = table.codes().map(|c| c.raw()[0]).collect();
        assert_eq!(table.len(), 29);
        assert!(!raws.contains(&0x00));
        assert!(!raws.contains(&b'\t') && !raws.contains(&b'\n') && !raws.contains(&b'\r'));
        assert_eq!(table.encode(b"\x7f", TextEncoding::Utf8), b"[CTRL_7F]");
    }

    #[test]
    fn test_encode_mixed_content() {
        let table = ControlCodeTable::builtin();
        let escaped = table.encode(b"Press \x1f to jump\n", TextEncoding::Latin1);
        assert_eq!(escaped, b"Press [CTRL_1F] to jump\n");
        assert_eq!(table.encode(&escaped, TextEncoding::Latin1), escaped);
    }

    #[test]
    fn test_two_byte_sequence_only_replaced_whole() {
        let table = ControlCodeTable::new([(vec![0x1F, 0x01], "[ICON_A]")]).unwrap();
        assert_eq!(table.encode(b"a\x1f\x01b", TextEncoding::Utf8), b"a[ICON_A]b");
        assert_eq!(table.encode(b"a\x1fb", TextEncoding::Utf8), b"a\x1fb");
    }

    #[test]
    fn test_utf16_alignment() {
        let table = ControlCodeTable::new([(vec![0x01, 0x00], "[A]")]).unwrap();
        // 0x0100 at an odd offset straddles two code units and must not match
        let raw = [b'x', 0x00, 0x01, 0x00];
        let escaped = table.encode(&raw, TextEncoding::Utf16);
        assert_eq!(escaped, [b'x', 0, b'[', 0, b'A', 0, b']', 0]);
        assert_eq!(table.decode(&escaped, TextEncoding::Utf16), raw);

        let misaligned = [0x00, 0x01, 0x00, 0x00];
        assert_eq!(table.encode(&misaligned, TextEncoding::Utf16), misaligned);
    }

    #[test]
    fn test_rejects_prefix_and_duplicates() {
        assert!(ControlCodeTable::new([(vec![0x1F], "[A]"), (vec![0x1F, 0x01], "[B]")]).is_err());
        assert!(ControlCodeTable::new([(vec![0x01], "[A]"), (vec![0x02], "[A]")]).is_err());
        assert!(ControlCodeTable::new([(vec![0x01], "[A]"), (vec![0x02], "[A]x")]).is_err());
        assert!(ControlCodeTable::new([(vec![0x01, 0x02, 0x03], "[A]")]).is_err());
        assert!(ControlCodeTable::new([(b"A".to_vec(), "[A]")]).is_err());
        assert!(ControlCodeTable::new([(vec![0x01], "\u{7}")]).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{ "codes": [ { "raw": "1F 01", "token": "[ICON_A]" }, { "raw": "1e", "token": "[END]" } ] }"#;
        let table = ControlCodeTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.codes().next().unwrap().raw(), [0x1F, 0x01]);

        let reloaded = ControlCodeTable::from_json(&table.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_json_bad_hex() {
        let err = ControlCodeTable::from_json(r#"{ "codes": [ { "raw": "zz", "token": "[X]" } ] }"#);
        assert!(matches!(err, Err(Error::InvalidControlCodeTable(_))));
    }
}
