//! Per-(task, provider) performance history
//!
//! Every execution produces an [`Observation`] that is folded into a
//! [`PerformanceRecord`] with a fixed 0.8/0.2 exponential moving average.

pub mod record;
pub mod table;

pub use record::{HISTORY_WEIGHT, OBSERVATION_WEIGHT, Observation, PerformanceRecord};
pub use table::PerformanceTable;
