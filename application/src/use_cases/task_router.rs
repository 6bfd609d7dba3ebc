//! Router API
//!
//! [`TaskRouter`] is the explicit service instance behind every routing
//! request: decide a provider, execute, optionally merge a consensus, then
//! record performance and spend.

use super::config_store::ConfigStore;
use super::error::RouterError;
use super::execution_coordinator::{ExecutionCoordinator, ProviderAdapters};
use super::performance_tracker::PerformanceTracker;
use crate::config::ExecutionParams;
use crate::ports::clock::Clock;
use crate::ports::event_logger::{EventLogger, RoutingEvent};
use crate::ports::progress::{ExecutionProgress, NoProgress};
use crate::ports::state_store::StateStore;
use insight_domain::{
    BudgetStatus, ConsensusEngine, ConsensusResult, CostLedger, ExecutionOutcome, PatchReport,
    PerformanceRecord, ProviderId, ProviderSelector, RouterConfig, RouterConfigPatch,
    RoutingDecision, RoutingOptions, RoutingReason, TaskDefinition, TaskRegistry, VisualAsset,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of running a task on both providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MultiProviderInsight {
    /// Both providers succeeded and were merged
    Consensus(ConsensusResult),
    /// Exactly one provider succeeded; no consensus is computed.
    ///
    /// `outcome` is the only result. `failure` is diagnostic: it always has
    /// `succeeded == false`, carries no analysis, and explains itself in
    /// `error_detail`. It is excluded from [`Self::successful_outcomes`]
    /// and [`Self::total_cost`].
    Partial {
        /// The surviving provider's result
        outcome: ExecutionOutcome,
        /// The failed provider's outcome, for its `error_detail`
        failure: ExecutionOutcome,
    },
}

impl MultiProviderInsight {
    pub fn consensus(&self) -> Option<&ConsensusResult> {
        match self {
            MultiProviderInsight::Consensus(result) => Some(result),
            MultiProviderInsight::Partial { .. } => None,
        }
    }

    /// Successful outcomes, quality first.
    pub fn successful_outcomes(&self) -> Vec<&ExecutionOutcome> {
        match self {
            MultiProviderInsight::Consensus(result) => result
                .outcome_a
                .iter()
                .chain(result.outcome_b.iter())
                .collect(),
            MultiProviderInsight::Partial { outcome, .. } => vec![outcome],
        }
    }

    pub fn total_cost(&self) -> f64 {
        match self {
            MultiProviderInsight::Consensus(result) => result.total_cost(),
            MultiProviderInsight::Partial { outcome, .. } => outcome.cost_incurred,
        }
    }
}

/// Collaborators injected into a [`TaskRouter`].
pub struct RouterDependencies {
    pub registry: TaskRegistry,
    pub adapters: ProviderAdapters,
    pub store: Arc<dyn StateStore>,
    pub clock: Arc<dyn Clock>,
    pub event_logger: Arc<dyn EventLogger>,
    /// Used when no router config has been persisted yet
    pub initial_config: RouterConfig,
    pub params: ExecutionParams,
}

pub struct TaskRouter {
    registry: TaskRegistry,
    config: ConfigStore,
    tracker: Arc<PerformanceTracker>,
    coordinator: ExecutionCoordinator,
    consensus: ConsensusEngine,
    ledger: Mutex<CostLedger>,
    clock: Arc<dyn Clock>,
    event_logger: Arc<dyn EventLogger>,
}

impl TaskRouter {
    /// Build the router, loading config and performance history from the
    /// store. Unreadable state falls back to defaults.
    pub fn new(deps: RouterDependencies) -> Self {
        let config =
            ConfigStore::load(Arc::clone(&deps.store), deps.initial_config, &deps.registry);
        let tracker = Arc::new(PerformanceTracker::load(deps.store));
        let coordinator = ExecutionCoordinator::new(
            deps.adapters,
            Arc::clone(&tracker),
            Arc::clone(&deps.clock),
            deps.params,
        );

        info!(
            "Router ready with {} tasks, {} performance records",
            deps.registry.len(),
            tracker.records().len()
        );

        Self {
            registry: deps.registry,
            config,
            tracker,
            coordinator,
            consensus: ConsensusEngine::new(),
            ledger: Mutex::new(CostLedger::new(deps.clock.today())),
            clock: deps.clock,
            event_logger: deps.event_logger,
        }
    }

    /// Abort in-flight provider calls when this token is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.coordinator = self.coordinator.with_cancellation(token);
        self
    }

    // ==================== Routing ====================

    /// Decide the provider for a task, reporting the rule that applied.
    pub fn route(&self, task_id: &str, options: &RoutingOptions) -> RoutingDecision {
        let config = self.config.get_config();
        let performance = self.tracker.snapshot();
        let decision =
            ProviderSelector::new(&self.registry, &config, &performance).decide(task_id, options);

        match decision.reason {
            RoutingReason::UnknownTask => warn!(
                "Unknown task '{}', using default provider {}",
                task_id, decision.provider
            ),
            RoutingReason::Scored { quality, fast } => debug!(
                "Scored {}: quality={:.4} fast={:.4} -> {}",
                task_id, quality, fast, decision.provider
            ),
            _ => debug!(
                "Routed {} to {} ({})",
                task_id,
                decision.provider,
                decision.reason.as_str()
            ),
        }

        self.event_logger.log(RoutingEvent::new(
            "provider_selected",
            json!({
                "task_id": task_id,
                "provider": decision.provider,
                "reason": decision.reason,
            }),
        ));
        decision
    }

    pub fn get_optimal_provider(&self, task_id: &str, options: &RoutingOptions) -> ProviderId {
        self.route(task_id, options).provider
    }

    // ==================== Execution ====================

    /// Route and run a task on one provider.
    ///
    /// A provider failure is returned as a failed outcome, not an error.
    pub async fn get_single_insight(
        &self,
        task_id: &str,
        payload: &Value,
        options: &RoutingOptions,
    ) -> Result<ExecutionOutcome, RouterError> {
        self.get_single_insight_with_progress(task_id, payload, options, &NoProgress)
            .await
    }

    pub async fn get_single_insight_with_progress(
        &self,
        task_id: &str,
        payload: &Value,
        options: &RoutingOptions,
        progress: &dyn ExecutionProgress,
    ) -> Result<ExecutionOutcome, RouterError> {
        let provider = self.get_optimal_provider(task_id, options);
        info!("Running {} on {}", task_id, provider);

        let outcome = self
            .coordinator
            .execute(task_id, payload, provider, progress)
            .await?;

        self.charge(outcome.cost_incurred);
        self.log_execution(task_id, &outcome);
        Ok(outcome)
    }

    /// Run a task on both providers and merge the results.
    ///
    /// With one failure the surviving outcome is returned without a
    /// consensus; with two, [`RouterError::AllProvidersFailed`].
    pub async fn get_multi_provider_insight(
        &self,
        task_id: &str,
        payload: &Value,
    ) -> Result<MultiProviderInsight, RouterError> {
        self.get_multi_provider_insight_with_progress(task_id, payload, &NoProgress)
            .await
    }

    pub async fn get_multi_provider_insight_with_progress(
        &self,
        task_id: &str,
        payload: &Value,
        progress: &dyn ExecutionProgress,
    ) -> Result<MultiProviderInsight, RouterError> {
        if !self.registry.contains(task_id) {
            warn!("Unknown task '{}' requested on both providers", task_id);
        }
        info!("Running {} on both providers", task_id);

        let dual = self.coordinator.execute_both(task_id, payload, progress).await?;
        self.log_execution(task_id, &dual.quality);
        self.log_execution(task_id, &dual.fast);

        let insight = if dual.both_succeeded() {
            let result = self.consensus.merge(dual.quality, dual.fast)?;
            info!(
                "Consensus for {}: agreement={:.2} confidence={:.2} agreed={}",
                task_id,
                result.agreement,
                result.confidence,
                result.agreed_count()
            );
            self.event_logger.log(RoutingEvent::new(
                "consensus_merged",
                json!({
                    "task_id": task_id,
                    "agreement": result.agreement,
                    "confidence": result.confidence,
                    "merged_recommendations": result.merged_recommendations.len(),
                    "agreed": result.agreed_count(),
                    "cost_delta": result.cost_comparison.delta,
                }),
            ));
            MultiProviderInsight::Consensus(result)
        } else if dual.quality.succeeded {
            MultiProviderInsight::Partial {
                outcome: dual.quality,
                failure: dual.fast,
            }
        } else {
            MultiProviderInsight::Partial {
                outcome: dual.fast,
                failure: dual.quality,
            }
        };

        self.charge(insight.total_cost());
        Ok(insight)
    }

    /// Generate a visual asset on the fast provider and charge its cost.
    pub async fn generate_visual(&self, brief: &str) -> Result<VisualAsset, RouterError> {
        let asset = self
            .coordinator
            .adapters()
            .get(ProviderId::Fast)
            .generate_visual(brief)
            .await?;
        info!("Generated visual {} (cost {:.4})", asset.asset_ref, asset.cost);
        self.charge(asset.cost);
        Ok(asset)
    }

    // ==================== Configuration ====================

    /// Merge a partial config update; persisted when anything changed.
    pub fn configure(&self, patch: RouterConfigPatch) -> Result<PatchReport, RouterError> {
        let report = self
            .config
            .configure(patch, &self.registry)
            .map_err(RouterError::InvalidConfig)?;
        if report.changed {
            self.event_logger.log(RoutingEvent::new(
                "config_updated",
                json!({
                    "config": self.config.get_config(),
                    "ignored_overrides": report.ignored_overrides,
                }),
            ));
        }
        Ok(report)
    }

    pub fn get_config(&self) -> RouterConfig {
        self.config.get_config()
    }

    // ==================== Introspection ====================

    pub fn get_task_definitions(&self) -> Vec<TaskDefinition> {
        self.registry.definitions().to_vec()
    }

    pub fn get_performance_records(&self) -> Vec<PerformanceRecord> {
        self.tracker.records()
    }

    /// Blend a user satisfaction score into a task/provider record.
    ///
    /// Returns `None` when that pair has never been executed.
    pub fn record_feedback(
        &self,
        task_id: &str,
        provider: ProviderId,
        satisfaction: f64,
    ) -> Option<PerformanceRecord> {
        self.tracker.record_feedback(task_id, provider, satisfaction)
    }

    /// Spend against the configured budgets for the current day and month.
    pub fn budget_status(&self) -> BudgetStatus {
        let limits = self.config.get_config().budget_limits;
        self.ledger().status(&limits, self.clock.today())
    }

    fn charge(&self, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        let limits = self.config.get_config().budget_limits;
        let today = self.clock.today();
        let mut ledger = self.ledger();

        let before = ledger.status(&limits, today);
        ledger.charge(amount, today);
        let after = ledger.status(&limits, today);

        if after.daily.exceeded && !before.daily.exceeded {
            warn!(
                "Daily budget exceeded: spent {:.4} of {:.4}",
                after.daily.spent, after.daily.limit
            );
        }
        if after.monthly.exceeded && !before.monthly.exceeded {
            warn!(
                "Monthly budget exceeded: spent {:.4} of {:.4}",
                after.monthly.spent, after.monthly.limit
            );
        }
    }

    fn ledger(&self) -> MutexGuard<'_, CostLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn log_execution(&self, task_id: &str, outcome: &ExecutionOutcome) {
        self.event_logger.log(RoutingEvent::new(
            "execution_completed",
            json!({
                "task_id": task_id,
                "provider": outcome.provider_id,
                "succeeded": outcome.succeeded,
                "confidence": outcome.confidence,
                "cost": outcome.cost_incurred,
                "tokens": outcome.tokens_used,
                "response_time_ms": outcome.response_time_ms,
                "error": outcome.error_detail,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeAdapter, FixedClock, MemoryStore, RecordingLogger};
    use insight_domain::{
        BudgetLimits, Complexity, Observation, ProviderChoice, RecommendationSource,
    };

    struct Harness {
        router: TaskRouter,
        store: Arc<MemoryStore>,
        logger: Arc<RecordingLogger>,
        quality: Arc<FakeAdapter>,
        fast: Arc<FakeAdapter>,
    }

    fn harness_with(
        quality: FakeAdapter,
        fast: FakeAdapter,
        initial_config: RouterConfig,
    ) -> Harness {
        let store = Arc::new(MemoryStore::default());
        let logger = Arc::new(RecordingLogger::default());
        let quality = Arc::new(quality);
        let fast = Arc::new(fast);
        let router = TaskRouter::new(RouterDependencies {
            registry: TaskRegistry::with_defaults(),
            adapters: ProviderAdapters::new(quality.clone(), fast.clone()),
            store: store.clone(),
            clock: Arc::new(FixedClock::at(2026, 3, 10)),
            event_logger: logger.clone(),
            initial_config,
            params: ExecutionParams::default(),
        });
        Harness {
            router,
            store,
            logger,
            quality,
            fast,
        }
    }

    fn harness(quality: FakeAdapter, fast: FakeAdapter) -> Harness {
        harness_with(quality, fast, RouterConfig::default())
    }

    fn healthy() -> Harness {
        harness(
            FakeAdapter::replying(
                ProviderId::Quality,
                "Revenue growth remains strong across european markets this quarter",
                &["expand into european markets", "reduce churn with onboarding"],
                0.9,
                0.12,
            ),
            FakeAdapter::replying(
                ProviderId::Fast,
                "Revenue growth looks strong in european markets",
                &["expand into european markets now", "launch a referral program"],
                0.6,
                0.02,
            )
            .with_visuals(0.04),
        )
    }

    #[test]
    fn test_pinned_task_routes_without_history() {
        let h = healthy();
        let decision = h.router.route("quick-insights", &RoutingOptions::new());
        assert_eq!(decision.provider, ProviderId::Fast);
        assert_eq!(decision.reason, RoutingReason::TaskPinned);
        assert_eq!(h.logger.types(), vec!["provider_selected"]);
    }

    #[test]
    fn test_unknown_task_uses_default_provider() {
        let h = healthy();
        assert_eq!(
            h.router.get_optimal_provider("no-such-task", &RoutingOptions::new()),
            ProviderId::Quality
        );

        h.router
            .configure(RouterConfigPatch {
                default_provider: Some(ProviderChoice::Provider(ProviderId::Fast)),
                ..RouterConfigPatch::default()
            })
            .unwrap();
        assert_eq!(
            h.router.get_optimal_provider("no-such-task", &RoutingOptions::new()),
            ProviderId::Fast
        );
    }

    #[test]
    fn test_complex_auto_task_defaults_to_quality() {
        let h = harness_with(
            FakeAdapter::failing(ProviderId::Quality, "unused"),
            FakeAdapter::failing(ProviderId::Fast, "unused"),
            RouterConfig {
                cost_optimization: false,
                ..RouterConfig::default()
            },
        );
        let definition = h
            .router
            .get_task_definitions()
            .into_iter()
            .find(|t| t.id == "trend-forecast")
            .unwrap();
        assert_eq!(definition.complexity, Complexity::Complex);
        assert!(!definition.is_pinned());

        assert_eq!(
            h.router.get_optimal_provider("trend-forecast", &RoutingOptions::new()),
            ProviderId::Quality
        );
    }

    #[tokio::test]
    async fn test_single_insight_records_and_charges() {
        let h = healthy();
        let outcome = h
            .router
            .get_single_insight("market-analysis", &json!({"region": "eu"}), &RoutingOptions::new())
            .await
            .unwrap();

        assert_eq!(outcome.provider_id, ProviderId::Quality);
        assert!(outcome.succeeded);
        assert_eq!(h.quality.calls(), 1);
        assert_eq!(h.fast.calls(), 0);
        assert_eq!(h.router.get_performance_records().len(), 1);
        assert!((h.router.budget_status().daily.spent - 0.12).abs() < 1e-12);
        assert_eq!(
            h.logger.types(),
            vec!["provider_selected", "execution_completed"]
        );
    }

    #[tokio::test]
    async fn test_single_insight_failure_is_an_outcome() {
        let h = harness(
            FakeAdapter::failing(ProviderId::Quality, "invalid api key"),
            FakeAdapter::failing(ProviderId::Fast, "unused"),
        );
        let outcome = h
            .router
            .get_single_insight(
                "market-analysis",
                &json!({}),
                &RoutingOptions::new().force(ProviderId::Quality),
            )
            .await
            .unwrap();

        assert!(!outcome.succeeded);
        let record = &h.router.get_performance_records()[0];
        assert_eq!(record.provider_id, ProviderId::Quality);
        assert_eq!(record.success_rate, 0.0);
        assert_eq!(h.router.budget_status().daily.spent, 0.0);
    }

    #[tokio::test]
    async fn test_multi_provider_consensus() {
        let h = healthy();
        let insight = h
            .router
            .get_multi_provider_insight("competitor-review", &json!({}))
            .await
            .unwrap();

        let result = insight.consensus().unwrap();
        assert!(result.agreement > 0.0);
        assert_eq!(result.merged_recommendations[0].source, RecommendationSource::Agreed);
        assert_eq!(insight.successful_outcomes().len(), 2);
        assert!((h.router.budget_status().daily.spent - 0.14).abs() < 1e-12);
        assert!(h.logger.types().contains(&"consensus_merged".to_string()));
    }

    #[tokio::test]
    async fn test_multi_provider_partial_failure() {
        let h = harness(
            FakeAdapter::failing(ProviderId::Quality, "model overloaded"),
            FakeAdapter::replying(ProviderId::Fast, "quick take", &["ship it"], 0.7, 0.02),
        );

        let insight = h
            .router
            .get_multi_provider_insight("sentiment-summary", &json!({}))
            .await
            .unwrap();

        assert!(insight.consensus().is_none());
        let MultiProviderInsight::Partial { outcome, failure } = &insight else {
            panic!("expected partial insight");
        };
        assert_eq!(outcome.provider_id, ProviderId::Fast);
        assert_eq!(failure.provider_id, ProviderId::Quality);
        assert!(!failure.succeeded);
        assert!(failure.analysis_text.is_empty());
        assert!(failure.error_detail.as_deref().unwrap().contains("model overloaded"));

        let results = insight.successful_outcomes();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].provider_id, ProviderId::Fast);
        assert!((insight.total_cost() - 0.02).abs() < 1e-12);

        let records = h.router.get_performance_records();
        let quality = records
            .iter()
            .find(|r| r.provider_id == ProviderId::Quality)
            .unwrap();
        assert_eq!(quality.success_rate, 0.0);
        assert!(!h.logger.types().contains(&"consensus_merged".to_string()));
    }

    #[tokio::test]
    async fn test_multi_provider_total_failure() {
        let h = harness(
            FakeAdapter::failing(ProviderId::Quality, "quality down"),
            FakeAdapter::failing(ProviderId::Fast, "fast down"),
        );
        let err = h
            .router
            .get_multi_provider_insight("content-ideas", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::AllProvidersFailed { .. }));
        assert_eq!(h.router.get_performance_records().len(), 2);
    }

    #[tokio::test]
    async fn test_history_drives_auto_routing() {
        let h = healthy();
        let strong = Observation {
            cost: 0.02,
            confidence: 0.9,
            response_time_ms: 400.0,
            success: true,
            satisfaction: 0.9,
        };
        h.router
            .tracker
            .record("competitor-review", ProviderId::Fast, &strong);

        let decision = h.router.route("competitor-review", &RoutingOptions::new());
        assert_eq!(decision.provider, ProviderId::Fast);
        assert!(matches!(decision.reason, RoutingReason::Scored { .. }));
    }

    #[test]
    fn test_configure_logs_only_real_changes() {
        let h = healthy();
        h.router
            .configure(RouterConfigPatch::quality_first(true))
            .unwrap();
        h.router
            .configure(RouterConfigPatch::quality_first(true))
            .unwrap();

        assert!(h.router.get_config().quality_first);
        let updates = h
            .logger
            .types()
            .into_iter()
            .filter(|t| t == "config_updated")
            .count();
        assert_eq!(updates, 1);
        assert!(h.store.get("router_config").is_some());
    }

    #[test]
    fn test_feedback_updates_satisfaction() {
        let h = healthy();
        assert!(h
            .router
            .record_feedback("market-analysis", ProviderId::Quality, 1.0)
            .is_none());

        h.router.tracker.record(
            "market-analysis",
            ProviderId::Quality,
            &Observation {
                cost: 0.1,
                confidence: 0.5,
                response_time_ms: 1000.0,
                success: true,
                satisfaction: 0.5,
            },
        );
        let record = h
            .router
            .record_feedback("market-analysis", ProviderId::Quality, 0.0)
            .unwrap();
        assert!((record.user_satisfaction - 0.4).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_budget_exceeded_does_not_block() {
        let h = harness_with(
            FakeAdapter::replying(ProviderId::Quality, "costly", &[], 0.9, 0.8),
            FakeAdapter::failing(ProviderId::Fast, "unused"),
            RouterConfig {
                budget_limits: BudgetLimits {
                    daily: 1.0,
                    monthly: 10.0,
                },
                ..RouterConfig::default()
            },
        );

        for _ in 0..2 {
            let outcome = h
                .router
                .get_single_insight("market-analysis", &json!({}), &RoutingOptions::new())
                .await
                .unwrap();
            assert!(outcome.succeeded);
        }

        let status = h.router.budget_status();
        assert!(status.daily.exceeded);
        assert_eq!(status.daily.remaining, 0.0);
        assert!(!status.monthly.exceeded);
    }

    #[tokio::test]
    async fn test_generate_visual_charges_ledger() {
        let h = healthy();
        let asset = h.router.generate_visual("bar chart of q3 revenue").await.unwrap();
        assert!(asset.asset_ref.starts_with("asset://"));
        assert!((h.router.budget_status().daily.spent - 0.04).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_generate_visual_unsupported() {
        let h = harness(
            FakeAdapter::failing(ProviderId::Quality, "unused"),
            FakeAdapter::failing(ProviderId::Fast, "unused"),
        );
        let err = h.router.generate_visual("chart").await.unwrap_err();
        assert!(matches!(err, RouterError::Provider(_)));
    }
}
