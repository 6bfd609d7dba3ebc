//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod config_store;
pub mod error;
pub mod execution_coordinator;
pub mod performance_tracker;
pub mod task_router;

#[cfg(test)]
pub(crate) mod test_support;
