//! Errors surfaced by the router use cases

use crate::ports::provider_adapter::ProviderError;
use insight_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while serving a routing request
///
/// Single-provider failures are not errors: they come back as an
/// [`ExecutionOutcome`](insight_domain::ExecutionOutcome) with
/// `succeeded == false`.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Both providers failed (quality: {quality}; fast: {fast})")]
    AllProvidersFailed { quality: String, fast: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(DomainError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl RouterError {
    /// Whether this error came from cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RouterError::Cancelled)
    }
}
