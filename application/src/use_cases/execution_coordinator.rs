//! Provider execution with failure isolation
//!
//! Adapter errors become failed [`ExecutionOutcome`]s, and every settled
//! call (successful, failed or timed out) is recorded in the
//! [`PerformanceTracker`]. Cancelled calls are not recorded.

use super::error::RouterError;
use super::performance_tracker::PerformanceTracker;
use crate::config::ExecutionParams;
use crate::ports::clock::Clock;
use crate::ports::progress::ExecutionProgress;
use crate::ports::provider_adapter::{ProviderAdapter, ProviderError};
use insight_domain::{ExecutionOutcome, ProviderId};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// The two concrete provider adapters
#[derive(Clone)]
pub struct ProviderAdapters {
    pub quality: Arc<dyn ProviderAdapter>,
    pub fast: Arc<dyn ProviderAdapter>,
}

impl ProviderAdapters {
    pub fn new(quality: Arc<dyn ProviderAdapter>, fast: Arc<dyn ProviderAdapter>) -> Self {
        Self { quality, fast }
    }

    pub fn get(&self, provider: ProviderId) -> &Arc<dyn ProviderAdapter> {
        match provider {
            ProviderId::Quality => &self.quality,
            ProviderId::Fast => &self.fast,
        }
    }
}

/// Outcomes of running both providers on the same payload.
///
/// At least one of the two succeeded.
#[derive(Debug, Clone)]
pub struct DualExecution {
    pub quality: ExecutionOutcome,
    pub fast: ExecutionOutcome,
}

impl DualExecution {
    pub fn both_succeeded(&self) -> bool {
        self.quality.succeeded && self.fast.succeeded
    }
}

enum Settled {
    Done(ExecutionOutcome),
    Cancelled,
}

pub struct ExecutionCoordinator {
    adapters: ProviderAdapters,
    tracker: Arc<PerformanceTracker>,
    clock: Arc<dyn Clock>,
    params: ExecutionParams,
    cancellation_token: Option<CancellationToken>,
}

impl ExecutionCoordinator {
    pub fn new(
        adapters: ProviderAdapters,
        tracker: Arc<PerformanceTracker>,
        clock: Arc<dyn Clock>,
        params: ExecutionParams,
    ) -> Self {
        Self {
            adapters,
            tracker,
            clock,
            params,
            cancellation_token: None,
        }
    }

    /// Abort in-flight provider calls when this token is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn adapters(&self) -> &ProviderAdapters {
        &self.adapters
    }

    /// Run one provider.
    ///
    /// Only cancellation is an error; adapter failures and timeouts come
    /// back as a failed outcome.
    pub async fn execute(
        &self,
        task_id: &str,
        payload: &Value,
        provider: ProviderId,
        progress: &dyn ExecutionProgress,
    ) -> Result<ExecutionOutcome, RouterError> {
        progress.on_provider_start(task_id, provider);

        let settled = invoke(
            Arc::clone(self.adapters.get(provider)),
            task_id.to_string(),
            payload.clone(),
            self.params.timeout,
            self.cancellation_token.clone(),
            Arc::clone(&self.clock),
        )
        .await;

        let Settled::Done(outcome) = settled else {
            info!("Execution of {} on {} cancelled", task_id, provider);
            return Err(RouterError::Cancelled);
        };

        progress.on_provider_complete(task_id, provider, outcome.succeeded);
        self.settle(task_id, &outcome);
        Ok(outcome)
    }

    /// Run both providers concurrently and wait for both to settle.
    ///
    /// One failing provider never cancels or delays the other. When both
    /// fail, the composite [`RouterError::AllProvidersFailed`] is returned
    /// after both failures have been recorded.
    pub async fn execute_both(
        &self,
        task_id: &str,
        payload: &Value,
        progress: &dyn ExecutionProgress,
    ) -> Result<DualExecution, RouterError> {
        let mut join_set = JoinSet::new();

        for provider in ProviderId::ALL {
            progress.on_provider_start(task_id, provider);
            let adapter = Arc::clone(self.adapters.get(provider));
            let task_id = task_id.to_string();
            let payload = payload.clone();
            let timeout = self.params.timeout;
            let token = self.cancellation_token.clone();
            let clock = Arc::clone(&self.clock);

            join_set.spawn(async move {
                let settled = invoke(adapter, task_id, payload, timeout, token, clock).await;
                (provider, settled)
            });
        }

        let mut quality = None;
        let mut fast = None;
        let mut cancelled = false;

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((provider, Settled::Done(outcome))) => {
                    progress.on_provider_complete(task_id, provider, outcome.succeeded);
                    match provider {
                        ProviderId::Quality => quality = Some(outcome),
                        ProviderId::Fast => fast = Some(outcome),
                    }
                }
                Ok((_, Settled::Cancelled)) => cancelled = true,
                Err(e) => warn!("Provider task join error: {}", e),
            }
        }

        if cancelled {
            info!("Dual execution of {} cancelled", task_id);
            return Err(RouterError::Cancelled);
        }

        let now = self.clock.now_millis();
        let quality = quality.unwrap_or_else(|| {
            ExecutionOutcome::failure(ProviderId::Quality, "provider task aborted", now, 0)
        });
        let fast = fast.unwrap_or_else(|| {
            ExecutionOutcome::failure(ProviderId::Fast, "provider task aborted", now, 0)
        });

        self.settle(task_id, &quality);
        self.settle(task_id, &fast);

        if !quality.succeeded && !fast.succeeded {
            return Err(RouterError::AllProvidersFailed {
                quality: error_detail(&quality),
                fast: error_detail(&fast),
            });
        }

        Ok(DualExecution { quality, fast })
    }

    fn settle(&self, task_id: &str, outcome: &ExecutionOutcome) {
        if outcome.succeeded {
            info!(
                "{} answered {} in {}ms (cost {:.4})",
                outcome.provider_id, task_id, outcome.response_time_ms, outcome.cost_incurred
            );
        } else {
            warn!(
                "{} failed {}: {}",
                outcome.provider_id,
                task_id,
                error_detail(outcome)
            );
        }
        self.tracker.record_outcome(task_id, outcome);
    }
}

fn error_detail(outcome: &ExecutionOutcome) -> String {
    outcome
        .error_detail
        .clone()
        .unwrap_or_else(|| "unknown error".to_string())
}

/// Invoke one adapter under the optional deadline and cancellation token.
async fn invoke(
    adapter: Arc<dyn ProviderAdapter>,
    task_id: String,
    payload: Value,
    timeout: Option<Duration>,
    token: Option<CancellationToken>,
    clock: Arc<dyn Clock>,
) -> Settled {
    let provider = adapter.id();
    let started = Instant::now();

    let call = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, adapter.invoke(&task_id, &payload))
                .await
                .unwrap_or(Err(ProviderError::Timeout(limit))),
            None => adapter.invoke(&task_id, &payload).await,
        }
    };

    let result = match token {
        Some(token) => tokio::select! {
            _ = token.cancelled() => return Settled::Cancelled,
            result = call => result,
        },
        None => call.await,
    };

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let outcome = match result {
        Ok(reply) => ExecutionOutcome::success(provider, reply, elapsed_ms),
        Err(e) => {
            ExecutionOutcome::failure(provider, e.to_string(), clock.now_millis(), elapsed_ms)
        }
    };
    Settled::Done(outcome)
}
