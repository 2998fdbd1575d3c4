//! Live search session
//!
//! Wraps the resolver in an interactive loop: the host feeds every interim
//! path the user types as an [`LiveEvent::Edit`], and the session resolves
//! the latest one after a debounce delay, discarding superseded edits.
//! Accepting resolves once more unconditionally and ends the session;
//! cancelling (or dropping the sender) ends it without resolving.
//!
//! The debounce timer is owned by the session and dies with it; there is
//! no shared timer state anywhere.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::debug;

use crate::host::{search_once, SelectionSink, TextSource};
use crate::resolver::Resolver;

/// Delay between the last keystroke and resolution.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Input-surface events driving a live session.
#[derive(Debug, Clone)]
pub enum LiveEvent {
    /// The candidate path changed; resolve it after the debounce delay.
    Edit(String),
    /// The user confirmed the path; resolve immediately and close.
    Accept(String),
    /// The input surface was dismissed; close without resolving.
    Cancel,
}

/// What the event loop decided to do next.
enum Step {
    Debounced(String),
    Event(Option<LiveEvent>),
}

/// An interactive resolution session over one document.
pub struct LiveSearch<S, K> {
    resolver: Resolver,
    source: S,
    sink: K,
    debounce: Duration,
    events: mpsc::Receiver<LiveEvent>,
}

impl<S, K> LiveSearch<S, K>
where
    S: TextSource,
    K: SelectionSink,
{
    pub fn new(source: S, sink: K, events: mpsc::Receiver<LiveEvent>) -> Self {
        Self {
            resolver: Resolver::new(),
            source,
            sink,
            debounce: DEFAULT_DEBOUNCE,
            events,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Run the session until accept, cancel, or sender drop. Returns the
    /// sink so the host can recover it afterwards.
    pub async fn run(mut self) -> K {
        let mut pending: Option<String> = None;
        loop {
            let step = match pending.take() {
                Some(path) => {
                    let debounce = self.debounce;
                    let events = &mut self.events;
                    tokio::select! {
                        _ = sleep(debounce) => Step::Debounced(path),
                        event = events.recv() => Step::Event(event),
                    }
                }
                None => Step::Event(self.events.recv().await),
            };

            match step {
                Step::Debounced(path) => self.apply(&path),
                Step::Event(Some(LiveEvent::Edit(path))) => pending = Some(path),
                Step::Event(Some(LiveEvent::Accept(path))) => {
                    self.apply(&path);
                    break;
                }
                Step::Event(Some(LiveEvent::Cancel)) | Step::Event(None) => break,
            }
        }
        self.sink
    }

    /// Resolve one candidate path. Failure means "no update": the previous
    /// selection stays, and the reason is only logged.
    fn apply(&mut self, dot_path: &str) {
        match search_once(&self.resolver, &self.source, &mut self.sink, dot_path) {
            Ok(span) => debug!(start = span.start, end = span.end, "selection updated"),
            Err(e) => debug!(error = %e, "resolution failed, keeping previous selection"),
        }
    }
}
