//! Span and position types
//!
//! A resolved value is reported as a half-open byte range into the original
//! document. Structural characters are ASCII, so range endpoints always fall
//! on UTF-8 character boundaries.

use serde::Serialize;
use std::fmt;

/// Half-open byte range `[start, end)` into the document.
///
/// For string values the range excludes the surrounding quotes; for objects
/// and arrays it includes both brackets; for primitives it covers exactly
/// the literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Extract the covered text. `None` if the span does not fit `text`
    /// (i.e. it was resolved against a different document).
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// Zero-based line/column location of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    /// One-based, editor style: `3:14`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Convert a byte offset into a line/column position by counting newlines.
/// Offsets past the end of the text clamp to the final position.
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let offset = offset.min(text.len());
    let before = &text[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    Position {
        line,
        column: offset - line_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_extracts_covered_text() {
        let text = r#"{"a": 42}"#;
        let span = Span::new(6, 8);
        assert_eq!(span.slice(text), Some("42"));
    }

    #[test]
    fn slice_out_of_range_is_none() {
        let span = Span::new(5, 100);
        assert_eq!(span.slice("short"), None);
    }

    #[test]
    fn position_on_first_line() {
        let pos = offset_to_position("hello world", 6);
        assert_eq!(pos, Position { line: 0, column: 6 });
    }

    #[test]
    fn position_after_newlines() {
        let text = "{\n  \"a\": 1,\n  \"b\": 2\n}";
        // offset of the '2'
        let offset = text.find('2').unwrap();
        let pos = offset_to_position(text, offset);
        assert_eq!(pos, Position { line: 2, column: 7 });
    }

    #[test]
    fn position_clamps_past_end() {
        let pos = offset_to_position("ab", 99);
        assert_eq!(pos, Position { line: 0, column: 2 });
    }

    #[test]
    fn display_is_one_based() {
        let pos = Position { line: 2, column: 13 };
        assert_eq!(pos.to_string(), "3:14");
    }
}
