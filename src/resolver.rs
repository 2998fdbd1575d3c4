//! Dot-path resolution over raw document text
//!
//! The resolver walks the document one path segment at a time: find the
//! segment used as an object key inside the current region, jump past the
//! colon, and either narrow the region to the value's container (more
//! segments to go) or classify the terminal value and report its span.
//! The document is searched as plain text throughout; nothing is parsed
//! into a tree, so the same walk works on tolerant, not-quite-JSON input.
//!
//! Known limitations, kept deliberately:
//! - Key matching is textual. A key-like token inside a string literal can
//!   match before the real key.
//! - The first occurrence in a region wins; duplicate keys behind it are
//!   unreachable.

use dashmap::DashMap;
use regex::Regex;
use tracing::debug;

use crate::error::ResolveError;
use crate::scan::{find_matching_bracket, find_string_end, primitive_end, skip_whitespace};
use crate::span::Span;

/// Resolves dot paths to value spans.
///
/// Stateless as far as callers can observe; internally it caches the
/// compiled key pattern per segment, which pays off in live mode where the
/// same leading segments are re-resolved on every keystroke.
#[derive(Default)]
pub struct Resolver {
    key_patterns: DashMap<String, Regex>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `dot_path` against `document` and return the byte span of
    /// the value it names.
    ///
    /// Segments are split on `.`, trimmed, and empty segments are skipped
    /// (`a..b` resolves like `a.b`). A path with no non-empty segments
    /// fails with [`ResolveError::EmptyPath`] before any scanning.
    pub fn resolve(&self, document: &str, dot_path: &str) -> Result<Span, ResolveError> {
        let segments: Vec<&str> = dot_path
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if segments.is_empty() {
            return Err(ResolveError::EmptyPath);
        }

        let mut region_start = 0;
        let mut region_end = document.len();
        let mut value_start = 0;

        let last = segments.len() - 1;
        for (i, segment) in segments.iter().copied().enumerate() {
            let pattern = self.key_pattern(segment);
            let m = pattern
                .find(&document[region_start..region_end])
                .ok_or_else(|| ResolveError::KeyNotFound {
                    segment: segment.to_string(),
                })?;

            value_start = skip_whitespace(document, region_start + m.end());

            if i < last {
                match document.as_bytes().get(value_start) {
                    Some(b'{') | Some(b'[') => {}
                    _ => {
                        return Err(ResolveError::ExpectedContainer {
                            segment: segment.to_string(),
                        })
                    }
                }
                let close = find_matching_bracket(document, value_start)
                    .ok_or(ResolveError::UnbalancedBrackets)?;

                // Continue strictly inside the container.
                region_start = value_start + 1;
                region_end = close;
                debug!(segment, region_start, region_end, "narrowed region");
            }
        }

        self.terminal_span(document, value_start)
    }

    /// Classify the value starting at `value_start` and compute its span.
    fn terminal_span(&self, document: &str, value_start: usize) -> Result<Span, ResolveError> {
        match document.as_bytes().get(value_start) {
            Some(b'"') => {
                let end = find_string_end(document, value_start)
                    .ok_or(ResolveError::UnterminatedString)?;
                // Content only, quotes excluded.
                Ok(Span::new(value_start + 1, end))
            }
            Some(b'{') | Some(b'[') => {
                let end = find_matching_bracket(document, value_start)
                    .ok_or(ResolveError::UnbalancedBrackets)?;
                // Brackets included.
                Ok(Span::new(value_start, end + 1))
            }
            _ => Ok(Span::new(value_start, primitive_end(document, value_start))),
        }
    }

    /// Compiled matcher for `segment` used as an object key: either quoted
    /// (`"segment"`) or as a bare word, followed by a colon. The segment is
    /// regex-escaped so key names are matched verbatim.
    fn key_pattern(&self, segment: &str) -> Regex {
        if let Some(pattern) = self.key_patterns.get(segment) {
            return pattern.clone();
        }
        let escaped = regex::escape(segment);
        let pattern = Regex::new(&format!(r#"(?:"{escaped}"|\b{escaped}\b)\s*:\s*"#)).unwrap();
        self.key_patterns.insert(segment.to_string(), pattern.clone());
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(document: &str, path: &str) -> Result<Span, ResolveError> {
        Resolver::new().resolve(document, path)
    }

    fn matched<'a>(document: &'a str, path: &str) -> &'a str {
        let span = resolve(document, path).unwrap();
        span.slice(document).unwrap()
    }

    #[test]
    fn string_value_excludes_quotes() {
        let doc = r#"{"a": {"b": "hello"}}"#;
        assert_eq!(matched(doc, "a.b"), "hello");
    }

    #[test]
    fn array_value_includes_brackets() {
        let doc = r#"{"a": [1, 2, 3]}"#;
        assert_eq!(matched(doc, "a"), "[1, 2, 3]");
    }

    #[test]
    fn object_value_includes_braces() {
        let doc = r#"{"a": {"b": 1}, "c": 2}"#;
        assert_eq!(matched(doc, "a"), r#"{"b": 1}"#);
    }

    #[test]
    fn primitive_value_covers_token() {
        let doc = r#"{"x": 42}"#;
        assert_eq!(matched(doc, "x"), "42");
        assert_eq!(matched(r#"{"x": true}"#, "x"), "true");
        assert_eq!(matched(r#"{"x": null}"#, "x"), "null");
        assert_eq!(matched(r#"{"x": -1.5e3}"#, "x"), "-1.5e3");
    }

    #[test]
    fn missing_key_fails() {
        let doc = r#"{"a": {"b": 1}}"#;
        assert_eq!(
            resolve(doc, "a.c"),
            Err(ResolveError::KeyNotFound { segment: "c".into() })
        );
    }

    #[test]
    fn descending_into_a_leaf_fails() {
        let doc = r#"{"a": "b"}"#;
        assert_eq!(
            resolve(doc, "a.b"),
            Err(ResolveError::ExpectedContainer { segment: "a".into() })
        );
    }

    #[test]
    fn escaped_quote_stays_inside_string_value() {
        let doc = r#"{"k": "va\"lue"}"#;
        assert_eq!(matched(doc, "k"), r#"va\"lue"#);
    }

    #[test]
    fn unterminated_string_fails() {
        assert_eq!(
            resolve(r#"{"k": "abc"#, "k"),
            Err(ResolveError::UnterminatedString)
        );
    }

    #[test]
    fn unclosed_container_fails() {
        assert_eq!(
            resolve(r#"{"a": {"b": 1"#, "a.b"),
            Err(ResolveError::UnbalancedBrackets)
        );
        assert_eq!(
            resolve(r#"{"a": [1, 2"#, "a"),
            Err(ResolveError::UnbalancedBrackets)
        );
    }

    #[test]
    fn empty_path_fails_before_scanning() {
        assert_eq!(resolve(r#"{"a": 1}"#, ""), Err(ResolveError::EmptyPath));
        assert_eq!(resolve(r#"{"a": 1}"#, "   "), Err(ResolveError::EmptyPath));
        assert_eq!(resolve(r#"{"a": 1}"#, "..."), Err(ResolveError::EmptyPath));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let doc = r#"{"a": {"b": "hello"}}"#;
        assert_eq!(matched(doc, "a..b"), "hello");
        assert_eq!(matched(doc, ".a."), r#"{"b": "hello"}"#);
        assert_eq!(matched(doc, " a . b "), "hello");
    }

    #[test]
    fn unquoted_keys_and_trailing_commas_resolve() {
        let doc = "{a: {b: true,},}";
        assert_eq!(matched(doc, "a.b"), "true");
    }

    #[test]
    fn deep_nesting() {
        let doc = r#"{"page": {"inventory": {"definitions": {"title": "Product"}}}}"#;
        assert_eq!(matched(doc, "page.inventory.definitions.title"), "Product");
    }

    #[test]
    fn first_occurrence_wins_on_duplicate_keys() {
        let doc = r#"{"a": 1, "a": 2}"#;
        assert_eq!(matched(doc, "a"), "1");
    }

    #[test]
    fn key_token_inside_string_matches_first() {
        // Known limitation: matching is textual, so a key-shaped token
        // inside a string literal is found before the real key.
        let doc = r#"{"note": "a: 1", "a": 2}"#;
        assert_eq!(matched(doc, "a"), r#"1""#);
    }

    #[test]
    fn key_with_regex_metacharacters_is_literal() {
        let doc = r#"{"a+b": 1, "ab": 2, "a.b": 3}"#;
        assert_eq!(matched(doc, "a+b"), "1");
    }

    #[test]
    fn value_missing_after_colon_yields_empty_span() {
        let span = resolve(r#"{"a":"#, "a").unwrap();
        assert!(span.is_empty());
        assert_eq!(span.start, 5);
    }

    #[test]
    fn spans_stay_in_bounds() {
        let docs = [
            r#"{"a": {"b": "hello"}}"#,
            r#"{"a": [1, 2, 3]}"#,
            "{a: {b: true,},}",
            r#"{"k": "va\"lue"}"#,
        ];
        let paths = ["a", "a.b", "k"];
        for doc in docs {
            for path in paths {
                if let Ok(span) = resolve(doc, path) {
                    assert!(span.start <= span.end);
                    assert!(span.end <= doc.len());
                }
            }
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let resolver = Resolver::new();
        let doc = r#"{"a": {"b": "hello"}}"#;
        let first = resolver.resolve(doc, "a.b").unwrap();
        let second = resolver.resolve(doc, "a.b").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn nested_key_is_not_found_at_top_level_after_region_narrowing() {
        // "c" only exists outside the container "a" narrows into.
        let doc = r#"{"c": 9, "a": {"b": 1}}"#;
        assert_eq!(
            resolve(doc, "a.c"),
            Err(ResolveError::KeyNotFound { segment: "c".into() })
        );
    }
}
