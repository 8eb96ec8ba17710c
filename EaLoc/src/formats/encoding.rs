//! Text encodings for LOC string payloads
//!
//! Strings inside a LOC file carry no encoding marker, so the caller picks one
//! of a fixed set. Decoding is strict; [`TextEncoding::decode_trimmed`] adds the
//! trailing-byte recovery used by the exporter.

use std::fmt;
use std::str::FromStr;

/// Encoding applied to the string bytes of a LOC file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// UTF-16, little-endian, no byte-order mark
    Utf16,
    /// ISO-8859-1, one byte per code point
    Latin1,
}

/// Successful result of [`TextEncoding::decode_trimmed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded text
    pub text: String,
    /// Number of trailing bytes dropped before decoding succeeded
    pub trimmed: usize,
}

impl TextEncoding {
    /// Name used on the command line and in messages
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16 => "utf16",
            Self::Latin1 => "latin-1",
        }
    }

    /// Width of one code unit in bytes
    #[must_use]
    pub fn unit_width(self) -> usize {
        match self {
            Self::Utf16 => 2,
            Self::Utf8 | Self::Latin1 => 1,
        }
    }

    /// Decode bytes with no replacement characters.
    ///
    /// Returns `None` if any byte sequence is invalid in this encoding.
    #[must_use]
    pub fn decode_strict(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Self::Utf16 => encoding_rs::UTF_16LE
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(std::borrow::Cow::into_owned),
            Self::Latin1 => Some(bytes.iter().copied().map(char::from).collect()),
        }
    }

    /// Decode bytes, dropping trailing bytes one at a time until the rest decodes.
    ///
    /// An empty input decodes to an empty string. A non-empty input that only
    /// becomes decodable once every byte is gone yields `None`.
    #[must_use]
    pub fn decode_trimmed(self, bytes: &[u8]) -> Option<Decoded> {
        if bytes.is_empty() {
            return Some(Decoded {
                text: String::new(),
                trimmed: 0,
            });
        }

        (1..=bytes.len()).rev().find_map(|keep| {
            self.decode_strict(&bytes[..keep]).map(|text| Decoded {
                text,
                trimmed: bytes.len() - keep,
            })
        })
    }

    /// Encode text into bytes.
    ///
    /// # Errors
    /// Returns the first character the encoding cannot represent.
    pub fn encode(self, text: &str) -> std::result::Result<Vec<u8>, char> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf16 => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).map_err(|_| c))
                .collect(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "utf16" | "utf-16" | "utf-16le" | "utf16le" => Ok(Self::Utf16),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(format!(
                "Invalid encoding '{s}'. Valid values: utf8, utf16, latin-1"
            )),
        }
    }
}
