//! Application layer for insight-router
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    clock::{Clock, SystemClock},
    event_logger::{EventLogger, NoEventLogger, RoutingEvent},
    progress::{ExecutionProgress, NoProgress},
    provider_adapter::{ProviderAdapter, ProviderError},
    response_parser::{ParsedResponse, ResponseParser},
    state_store::{PERFORMANCE_METRICS_KEY, ROUTER_CONFIG_KEY, StateStore, StoreError},
};
pub use use_cases::config_store::ConfigStore;
pub use use_cases::error::RouterError;
pub use use_cases::execution_coordinator::{DualExecution, ExecutionCoordinator, ProviderAdapters};
pub use use_cases::performance_tracker::PerformanceTracker;
pub use use_cases::task_router::{MultiProviderInsight, RouterDependencies, TaskRouter};
