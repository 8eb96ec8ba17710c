//! Text form of a LOC file
//!
//! A line-oriented `key=value` document grouped into sections, one section
//! per language chunk:
//!
//! ```text
//! [LOCL_CHUNK_0]
//! LOCL_CHUNK_0_STRING_0=Hello
//! LOCL_CHUNK_0_STRING_1=World
//! ```
//!
//! Lines starting with `#` are comments. Values are escaped with
//! [`escape_value`] so every string stays on one line. Section and key order
//! carry the chunk and string order; keys themselves are informational.

mod escape;

pub use escape::{escape_value, unescape_value};

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Error, Result};

/// Marker opening a section header line
pub const SECTION_MARKER: char = '[';

/// Marker opening a comment line
pub const COMMENT_MARKER: char = '#';

/// Written by some Windows editors at the start of UTF-8 files
const BYTE_ORDER_MARK: char = '\u{feff}';

/// One `key=value` line, value unescaped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub key: String,
    pub value: String,
}

/// One `[SECTION]` and its entries in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSection {
    pub id: String,
    pub entries: Vec<TextEntry>,
}

impl TextSection {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(TextEntry {
            key: key.into(),
            value: value.into(),
        });
    }
}

/// A parsed or generated text document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    pub sections: Vec<TextSection>,
}

impl TextDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries across all sections
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Render the document. Sections are separated by a blank line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "[{}]", section.id);
            for entry in &section.entries {
                let _ = writeln!(out, "{}={}", entry.key, escape_value(&entry.value));
            }
        }
        out
    }

    /// Parse a document.
    ///
    /// A leading byte-order mark is ignored. Blank lines and `#` comments are
    /// skipped. A value runs from the first `=` to the end of the line.
    ///
    /// # Errors
    /// Returns [`Error::OrphanTextEntry`] for an entry before the first section
    /// and [`Error::MalformedTextLine`] for a line that is none of section,
    /// comment or entry.
    pub fn parse(content: &str) -> Result<Self> {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
        let mut sections: Vec<TextSection> = Vec::new();

        for (n, line) in content.lines().enumerate() {
            let line_no = n + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
                continue;
            }

            if trimmed.starts_with(SECTION_MARKER) {
                let id = trimmed
                    .trim_start_matches(SECTION_MARKER)
                    .trim_end_matches(']')
                    .trim();
                sections.push(TextSection::new(id));
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::MalformedTextLine {
                    line: line_no,
                    content: line.to_string(),
                });
            };
            let Some(section) = sections.last_mut() else {
                return Err(Error::OrphanTextEntry { line: line_no });
            };
            section.push(key.trim(), unescape_value(value));
        }

        Ok(Self { sections })
    }

    /// Read and parse a UTF-8 text file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
