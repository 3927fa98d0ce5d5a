//! Structured progress telemetry.
//!
//! Every inference component narrates what it found and why. Instead of
//! printing, the narration is collected as an ordered sequence of
//! [`Event`] records that callers may inspect, forward, or discard; each
//! record is also mirrored to the `log` facade. Correctness never depends
//! on the event stream.

use std::fmt;

use serde::Serialize;

/// The pipeline component an event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// Line normalizer and coherence filter
    Normalizer,
    /// Repeating header/footer detector
    HeaderFooter,
    /// Regular/Flyer classifier
    Classifier,
    /// Prominence-based title detector
    Title,
    /// Outline strategy chain
    Outline,
    /// Per-document orchestration and reconciliation
    Pipeline,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Normalizer => "normalizer",
            Component::HeaderFooter => "header-footer",
            Component::Classifier => "classifier",
            Component::Title => "title",
            Component::Outline => "outline",
            Component::Pipeline => "pipeline",
        };
        f.write_str(name)
    }
}

/// Severity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
}

/// One narration record.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Originating component
    pub component: Component,
    /// Severity
    pub level: EventLevel,
    /// Human-readable message
    pub message: String,
}

/// Ordered event collector for a single document pass.
///
/// Locally scoped per document; never shared between workers.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and mirror it to the `log` facade.
    pub fn record(&mut self, component: Component, level: EventLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            EventLevel::Debug => log::debug!("[{}] {}", component, message),
            EventLevel::Info => log::info!("[{}] {}", component, message),
            EventLevel::Warn => log::warn!("[{}] {}", component, message),
        }
        self.events.push(Event {
            component,
            level,
            message,
        });
    }

    /// Shorthand for an info-level record.
    pub fn info(&mut self, component: Component, message: impl Into<String>) {
        self.record(component, EventLevel::Info, message);
    }

    /// Shorthand for a debug-level record.
    pub fn debug(&mut self, component: Component, message: impl Into<String>) {
        self.record(component, EventLevel::Debug, message);
    }

    /// Events recorded so far, in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consume the log and return the event sequence.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}
