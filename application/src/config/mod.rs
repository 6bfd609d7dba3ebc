//! Application-level configuration.
//!
//! - [`ExecutionParams`]: provider call control (timeouts)

pub mod execution_params;

pub use execution_params::ExecutionParams;
