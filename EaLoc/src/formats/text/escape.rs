//! Line-safe escaping for text values
//!
//! | Character | Escaped |
//! |-----------|---------|
//! | `\`       | `\\`    |
//! | LF        | `\n`    |
//! | CR        | `\r`    |
//!
//! Any other backslash sequence is passed through unchanged on unescape.

use std::borrow::Cow;

/// Escape a value so it fits on a single line
#[must_use]
pub fn escape_value(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape_value`]
#[must_use]
pub fn unescape_value(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_becomes_two_characters() {
        assert_eq!(escape_value("Line one\nLine two"), "Line one\\nLine two");
        assert_eq!(unescape_value("Line one\\nLine two"), "Line one\nLine two");
    }

    #[test]
    fn test_backslashes_survive() {
        let original = "C:\\new\\folder\r\n";
        let escaped = escape_value(original);
        assert!(!escaped.contains('\n'));
        assert_eq!(unescape_value(&escaped), original);
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        assert_eq!(unescape_value("a\\tb\\"), "a\\tb\\");
    }
}
