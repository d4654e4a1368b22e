//! Progress and diagnostic events.
//!
//! The pipeline treats its event sink as a write-only side channel: it emits
//! after each batch and on every local failure, and never reads back. Console,
//! log-stream, and push-channel consumers are interchangeable behind
//! [`EventSink`].

use std::sync::Mutex;

/// One named event with its payload. `channel()` gives the wire name a
/// push-channel consumer would publish under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringEvent {
    /// Informational progress message.
    Update { message: String },
    /// Non-fatal failure diagnostic (parse failure, degraded batch).
    Error { message: String },
    /// Rows processed so far out of the total.
    Progress { processed: usize, total: usize },
}

impl ScoringEvent {
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Update { .. } => "update",
            Self::Error { .. } => "error",
            Self::Progress { .. } => "progress",
        }
    }
}

/// Write-only sink for pipeline events.
pub trait EventSink {
    fn emit(&self, event: &ScoringEvent);
}

/// Sink that forwards events to the tracing subscriber.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: &ScoringEvent) {
        match event {
            ScoringEvent::Update { message } => tracing::info!("{message}"),
            ScoringEvent::Error { message } => tracing::warn!("{message}"),
            ScoringEvent::Progress { processed, total } => {
                tracing::info!(processed, total, "batch complete");
            }
        }
    }
}

/// Sink that discards everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &ScoringEvent) {}
}

/// Sink that buffers events in memory, for tests and for consumers that
/// drain events into a push channel after the fact.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<ScoringEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScoringEvent> {
        self.events.lock().expect("event buffer poisoned").clone()
    }

    /// Payload messages emitted on a given channel, in emission order.
    pub fn messages_on(&self, channel: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.channel() == channel)
            .filter_map(|e| match e {
                ScoringEvent::Update { message } | ScoringEvent::Error { message } => {
                    Some(message)
                }
                ScoringEvent::Progress { .. } => None,
            })
            .collect()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &ScoringEvent) {
        self.events
            .lock()
            .expect("event buffer poisoned")
            .push(event.clone());
    }
}
