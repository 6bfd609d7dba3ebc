//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clock;
pub mod event_logger;
pub mod progress;
pub mod provider_adapter;
pub mod response_parser;
pub mod state_store;
