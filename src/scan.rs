//! Low-level scanners over raw document text
//!
//! These walk bytes literally instead of parsing: brackets and quotes are
//! tracked with a depth counter and a string-context flag, which is what
//! lets the resolver cope with trailing commas, comments between values,
//! and other not-quite-JSON input. All structural characters are ASCII, so
//! byte indexing never splits a UTF-8 sequence.

/// Find the offset of the bracket matching the opener at `open_idx`.
///
/// Tracks nesting depth starting at 1. Inside a string a backslash consumes
/// two positions whatever follows it (no validation of the escape), and an
/// unescaped `"` leaves string context. `None` when the text ends before
/// depth returns to zero, or when `open_idx` does not sit on `{` or `[`.
pub fn find_matching_bracket(text: &str, open_idx: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let (open, close) = match bytes.get(open_idx) {
        Some(b'{') => (b'{', b'}'),
        Some(b'[') => (b'[', b']'),
        _ => return None,
    };

    let mut depth = 1usize;
    let mut in_string = false;
    let mut i = open_idx + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                b'\\' => i += 2,
                b'"' => {
                    in_string = false;
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b if b == open => depth += 1,
            b if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Find the closing quote of the string opened at `quote_idx`.
///
/// A backslash skips the following position, so `\"` does not terminate.
/// `None` when the text ends first.
pub fn find_string_end(text: &str, quote_idx: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = quote_idx + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// End offset of a primitive token starting at `start`: advance until
/// whitespace, `,`, `}`, or `]`. Starting at (or past) the end of the text
/// yields an empty token.
pub fn primitive_end(text: &str, start: usize) -> usize {
    if start >= text.len() {
        return text.len();
    }
    for (i, c) in text[start..].char_indices() {
        if c.is_whitespace() || matches!(c, ',' | '}' | ']') {
            return start + i;
        }
    }
    text.len()
}

/// First non-whitespace offset at or after `from`.
pub fn skip_whitespace(text: &str, from: usize) -> usize {
    if from >= text.len() {
        return text.len();
    }
    text[from..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}
