//! Spanpath - dot-path span resolution for JSON-like text
//!
//! Given raw document text and a dot-separated key path (`a.b.c`), locate
//! the value the path names and return its exact byte span in the original
//! text. No syntax tree is built and the text does not have to be valid
//! JSON: the scanner walks brackets and strings literally, so trailing
//! commas, unquoted keys, and other JSON5-ish looseness resolve fine.

pub mod error;
pub mod host;
pub mod live;
pub mod resolver;
pub mod scan;
pub mod span;

pub use error::{FixSuggestion, ResolveError};
pub use host::{search_once, FileSource, InMemorySource, SelectionSink, TextSource};
pub use live::{LiveEvent, LiveSearch};
pub use resolver::Resolver;
pub use span::{offset_to_position, Position, Span};
