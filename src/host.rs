//! Host integration seam
//!
//! The resolver itself only sees strings; everything editor-shaped lives
//! behind two small traits. A text source hands over the full document
//! content, read fresh on every resolution so live edits are visible, and
//! a selection sink consumes the resolved span with its line/column
//! endpoints (a real host would turn that into a selection and scroll it
//! into view).

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use crate::error::ResolveError;
use crate::resolver::Resolver;
use crate::span::{offset_to_position, Position, Span};

/// Provides the full document content. Implementations must return the
/// current content on every call, not a cached snapshot.
pub trait TextSource {
    fn text(&self) -> String;
}

/// Consumes a resolved selection.
pub trait SelectionSink {
    fn select(&mut self, span: Span, start: Position, end: Position);
}

/// A fixed document held in memory.
pub struct InMemorySource {
    content: String,
}

impl InMemorySource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl TextSource for InMemorySource {
    fn text(&self) -> String {
        self.content.clone()
    }
}

/// A document backed by a file, re-read on every call so edits made while
/// a live session is open are picked up. When a re-read fails the last
/// successfully read content is served instead.
pub struct FileSource {
    path: PathBuf,
    last_good: Mutex<String>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_good: Mutex::new(String::new()),
        }
    }
}

impl TextSource for FileSource {
    fn text(&self) -> String {
        let mut last_good = match self.last_good.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                *last_good = content.clone();
                content
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "re-read failed, serving last good content");
                last_good.clone()
            }
        }
    }
}

/// One-shot search: read the document, resolve the path, and feed the
/// selection to the sink. Shared by the `search` command and each live
/// resolution.
pub fn search_once<S, K>(
    resolver: &Resolver,
    source: &S,
    sink: &mut K,
    dot_path: &str,
) -> Result<Span, ResolveError>
where
    S: TextSource,
    K: SelectionSink,
{
    let text = source.text();
    let span = resolver.resolve(&text, dot_path.trim())?;
    let start = offset_to_position(&text, span.start);
    let end = offset_to_position(&text, span.end);
    sink.select(span, start, end);
    Ok(span)
}
