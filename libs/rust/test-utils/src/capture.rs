//! In-memory capture of diagnostic events.
//!
//! [`DiagnosticCapture`] is a `tracing_subscriber` layer that records every
//! event it sees, so tests can assert on whether output was produced.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// A captured diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level
    pub level: Level,
    /// Event target (module path by default)
    pub target: String,
    /// Formatted message
    pub message: String,
    /// Remaining fields as `name=value`
    pub fields: Vec<String>,
}

/// Layer recording events into shared memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl DiagnosticCapture {
    /// Create an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install this capture as the current thread's default subscriber.
    ///
    /// The previous default is restored when the returned guard drops.
    #[must_use = "capture stops when the guard is dropped"]
    pub fn set_default(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    /// All events captured so far.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    /// Messages of all events captured so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|e| e.message.clone()).collect()
    }

    /// Number of captured events.
    #[must_use]
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Whether any captured message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|e| e.message.contains(needle))
    }

    /// Discard captured events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Subscriber> Layer<S> for DiagnosticCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<String>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}
