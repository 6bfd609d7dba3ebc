//! Progress notification port
//!
//! Defines the interface for reporting provider calls while a request runs.

use insight_domain::ProviderId;

/// Callback for progress updates during execution
///
/// Implementations live in the presentation layer. Calls may arrive from
/// concurrently running provider tasks.
pub trait ExecutionProgress: Send + Sync {
    /// Called right before a provider is invoked
    fn on_provider_start(&self, task_id: &str, provider: ProviderId);

    /// Called once the provider call has settled
    fn on_provider_complete(&self, task_id: &str, provider: ProviderId, success: bool);
}

/// No-op progress notifier
pub struct NoProgress;

impl ExecutionProgress for NoProgress {
    fn on_provider_start(&self, _task_id: &str, _provider: ProviderId) {}
    fn on_provider_complete(&self, _task_id: &str, _provider: ProviderId, _success: bool) {}
}
