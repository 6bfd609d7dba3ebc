//! Execution parameters: provider call control.
//!
//! [`ExecutionParams`] groups the static parameters that bound a single
//! provider invocation in
//! [`ExecutionCoordinator`](crate::use_cases::execution_coordinator::ExecutionCoordinator).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider call control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Deadline for each provider call. An expired call counts as a
    /// provider failure. `None` leaves timeouts to the adapter.
    pub timeout: Option<Duration>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl ExecutionParams {
    /// Creates params from an optional timeout in seconds.
    ///
    /// `None` or zero disables the deadline.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_from_timeout_seconds() {
        assert_eq!(
            ExecutionParams::from_timeout_seconds(Some(30)).timeout,
            Some(Duration::from_secs(30))
        );
        assert!(ExecutionParams::from_timeout_seconds(Some(0)).timeout.is_none());
        assert!(ExecutionParams::from_timeout_seconds(None).timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default().with_timeout(None);
        assert!(params.timeout.is_none());
    }
}
