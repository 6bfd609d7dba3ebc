//! Logging infrastructure: structured routing event logging.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer that implements
//! the [`EventLogger`](insight_application::EventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;
