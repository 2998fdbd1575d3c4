//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Why a dot path failed to resolve.
///
/// Every variant is recoverable: the resolver never panics on malformed
/// input, the worst case is "no match".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("empty path: nothing to search for")]
    EmptyPath,

    #[error("key '{segment}' not found")]
    KeyNotFound { segment: String },

    #[error("'{segment}' holds a primitive value, expected an object or array")]
    ExpectedContainer { segment: String },

    #[error("unbalanced brackets: a container is never closed")]
    UnbalancedBrackets,

    #[error("unterminated string: the opening quote is never closed")]
    UnterminatedString,
}

impl FixSuggestion for ResolveError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ResolveError::EmptyPath => Some("Use format: key.nested.deeper"),
            ResolveError::KeyNotFound { .. } => {
                Some("Check the spelling, or whether the key lives in a different branch")
            }
            ResolveError::ExpectedContainer { .. } => {
                Some("Drop the trailing segments - the path descends into a leaf value")
            }
            ResolveError::UnbalancedBrackets => {
                Some("The document has an unclosed { or [ before this value ends")
            }
            ResolveError::UnterminatedString => {
                Some("The document has an unclosed \" before this value ends")
            }
        }
    }
}
