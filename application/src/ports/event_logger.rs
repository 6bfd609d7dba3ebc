//! Port for structured routing event logging.
//!
//! Defines the [`EventLogger`] trait for recording routing decisions,
//! execution results, consensus merges and config changes to a
//! machine-readable log (JSONL).
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures an audit trail.

use serde_json::Value;

/// A structured routing event.
pub struct RoutingEvent {
    /// Event type identifier (e.g., "provider_selected", "execution_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RoutingEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging routing events.
///
/// `log` is synchronous and infallible; write failures are the
/// implementation's concern and never reach the request path.
pub trait EventLogger: Send + Sync {
    fn log(&self, event: RoutingEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log(&self, _event: RoutingEvent) {}
}
