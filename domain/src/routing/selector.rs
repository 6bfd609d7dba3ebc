//! Provider selection
//!
//! Resolution order:
//!
//! 1. A forced concrete provider wins outright
//! 2. Unknown task → configured default provider (`auto` → quality)
//! 3. Task pinned to a concrete provider → that provider
//! 4. Per-task override from config
//! 5. Weighted scoring over history, or the complexity heuristic when there
//!    is no history at all

use super::scoring::{self, ScoringBias};
use crate::config::RouterConfig;
use crate::core::provider::{ProviderChoice, ProviderId};
use crate::performance::PerformanceTable;
use crate::task::TaskRegistry;
use serde::{Deserialize, Serialize};

/// Per-request routing options.
///
/// `cost_priority` / `quality_priority` fall back to the config's
/// `cost_optimization` / `quality_first` when unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingOptions {
    pub force_provider: Option<ProviderChoice>,
    pub cost_priority: Option<bool>,
    pub quality_priority: Option<bool>,
}

impl RoutingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force(mut self, provider: impl Into<ProviderChoice>) -> Self {
        self.force_provider = Some(provider.into());
        self
    }

    pub fn with_cost_priority(mut self, value: bool) -> Self {
        self.cost_priority = Some(value);
        self
    }

    pub fn with_quality_priority(mut self, value: bool) -> Self {
        self.quality_priority = Some(value);
        self
    }
}

/// Why a provider was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutingReason {
    Forced,
    UnknownTask,
    TaskPinned,
    ConfigOverride,
    DefaultHeuristic,
    Scored { quality: f64, fast: f64 },
}

impl RoutingReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingReason::Forced => "forced",
            RoutingReason::UnknownTask => "unknown_task",
            RoutingReason::TaskPinned => "task_pinned",
            RoutingReason::ConfigOverride => "config_override",
            RoutingReason::DefaultHeuristic => "default_heuristic",
            RoutingReason::Scored { .. } => "scored",
        }
    }
}

/// Selected provider plus the rule that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub provider: ProviderId,
    pub reason: RoutingReason,
}

impl RoutingDecision {
    fn new(provider: ProviderId, reason: RoutingReason) -> Self {
        Self { provider, reason }
    }
}

/// Pure decision function over a snapshot of registry, config and history.
pub struct ProviderSelector<'a> {
    registry: &'a TaskRegistry,
    config: &'a RouterConfig,
    performance: &'a PerformanceTable,
}

impl<'a> ProviderSelector<'a> {
    pub fn new(
        registry: &'a TaskRegistry,
        config: &'a RouterConfig,
        performance: &'a PerformanceTable,
    ) -> Self {
        Self {
            registry,
            config,
            performance,
        }
    }

    /// Resolve the provider for a task.
    pub fn resolve(&self, task_id: &str, options: &RoutingOptions) -> ProviderId {
        self.decide(task_id, options).provider
    }

    /// Resolve the provider for a task, reporting which rule applied.
    pub fn decide(&self, task_id: &str, options: &RoutingOptions) -> RoutingDecision {
        if let Some(ProviderChoice::Provider(forced)) = options.force_provider {
            return RoutingDecision::new(forced, RoutingReason::Forced);
        }

        let Some(task) = self.registry.lookup(task_id) else {
            let provider = self
                .config
                .default_provider
                .concrete()
                .unwrap_or(ProviderId::Quality);
            return RoutingDecision::new(provider, RoutingReason::UnknownTask);
        };

        if let Some(pinned) = task.primary_provider.concrete() {
            return RoutingDecision::new(pinned, RoutingReason::TaskPinned);
        }

        if let Some(overridden) = self.config.override_for(task_id) {
            return RoutingDecision::new(overridden, RoutingReason::ConfigOverride);
        }

        let quality = self.performance.get(task_id, ProviderId::Quality);
        let fast = self.performance.get(task_id, ProviderId::Fast);

        if quality.is_none() && fast.is_none() {
            let provider =
                scoring::default_heuristic(task.complexity, self.config.cost_optimization);
            return RoutingDecision::new(provider, RoutingReason::DefaultHeuristic);
        }

        let bias = ScoringBias {
            cost_priority: options
                .cost_priority
                .unwrap_or(self.config.cost_optimization),
            quality_priority: options
                .quality_priority
                .unwrap_or(self.config.quality_first),
        };
        let quality_score = scoring::score(quality, task.cost_efficiency_factor, bias);
        let fast_score = scoring::score(fast, task.cost_efficiency_factor, bias);

        RoutingDecision::new(
            scoring::pick(quality_score, fast_score),
            RoutingReason::Scored {
                quality: quality_score,
                fast: fast_score,
            },
        )
    }
}
