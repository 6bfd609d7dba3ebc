//! Mutable router configuration and its typed partial update

use crate::core::error::DomainError;
use crate::core::provider::{ProviderChoice, ProviderId};
use crate::task::TaskRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Spend limits in provider currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetLimits {
    pub daily: f64,
    pub monthly: f64,
}

impl Default for BudgetLimits {
    fn default() -> Self {
        Self {
            daily: 10.0,
            monthly: 250.0,
        }
    }
}

/// Router configuration singleton.
///
/// `cost_optimization` and `quality_first` also act as the defaults for the
/// per-request `cost_priority` / `quality_priority` routing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Provider used for unknown tasks (`auto` resolves to quality)
    pub default_provider: ProviderChoice,
    pub cost_optimization: bool,
    pub quality_first: bool,
    pub budget_limits: BudgetLimits,
    /// Forced provider for `auto` tasks, keyed by task id
    pub per_task_override: BTreeMap<String, ProviderId>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderChoice::Auto,
            cost_optimization: true,
            quality_first: false,
            budget_limits: BudgetLimits::default(),
            per_task_override: BTreeMap::new(),
        }
    }
}

/// Partial budget update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BudgetLimitsPatch {
    pub daily: Option<f64>,
    pub monthly: Option<f64>,
}

/// Partial [`RouterConfig`]. Absent fields are left untouched;
/// unknown keys fail deserialization.
///
/// # Example
///
/// ```
/// use insight_domain::RouterConfigPatch;
///
/// let patch: RouterConfigPatch = serde_json::from_str(r#"{"quality_first": true}"#).unwrap();
/// assert_eq!(patch.quality_first, Some(true));
///
/// assert!(serde_json::from_str::<RouterConfigPatch>(r#"{"qualityFrist": true}"#).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfigPatch {
    pub default_provider: Option<ProviderChoice>,
    pub cost_optimization: Option<bool>,
    pub quality_first: Option<bool>,
    pub budget_limits: Option<BudgetLimitsPatch>,
    /// Replaces the whole override map when present
    pub per_task_override: Option<BTreeMap<String, ProviderId>>,
}

impl RouterConfigPatch {
    pub fn quality_first(value: bool) -> Self {
        Self {
            quality_first: Some(value),
            ..Default::default()
        }
    }

    pub fn cost_optimization(value: bool) -> Self {
        Self {
            cost_optimization: Some(value),
            ..Default::default()
        }
    }
}

/// What [`RouterConfig::apply`] did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchReport {
    /// Whether any field actually changed
    pub changed: bool,
    /// Override keys dropped because no such task exists
    pub ignored_overrides: Vec<String>,
}

impl RouterConfig {
    /// Merge a patch into this config.
    ///
    /// Budget values must be finite and non-negative; on error nothing is
    /// modified. Override entries for unknown tasks are dropped and reported.
    pub fn apply(
        &mut self,
        patch: RouterConfigPatch,
        registry: &TaskRegistry,
    ) -> Result<PatchReport, DomainError> {
        let mut next = self.clone();
        let mut report = PatchReport::default();

        if let Some(provider) = patch.default_provider {
            next.default_provider = provider;
        }
        if let Some(value) = patch.cost_optimization {
            next.cost_optimization = value;
        }
        if let Some(value) = patch.quality_first {
            next.quality_first = value;
        }
        if let Some(budget) = patch.budget_limits {
            if let Some(daily) = budget.daily {
                next.budget_limits.daily = validate_budget("daily", daily)?;
            }
            if let Some(monthly) = budget.monthly {
                next.budget_limits.monthly = validate_budget("monthly", monthly)?;
            }
        }
        if let Some(overrides) = patch.per_task_override {
            let (known, unknown): (BTreeMap<_, _>, BTreeMap<_, _>) = overrides
                .into_iter()
                .partition(|(task_id, _)| registry.contains(task_id));
            report.ignored_overrides = unknown.into_keys().collect();
            next.per_task_override = known;
        }

        report.changed = next != *self;
        *self = next;
        Ok(report)
    }

    /// Override for a task, if one is configured.
    pub fn override_for(&self, task_id: &str) -> Option<ProviderId> {
        self.per_task_override.get(task_id).copied()
    }

    /// Drop override keys that do not reference a known task.
    /// Returns the removed keys.
    pub fn prune_unknown_overrides(&mut self, registry: &TaskRegistry) -> Vec<String> {
        let unknown: Vec<String> = self
            .per_task_override
            .keys()
            .filter(|k| !registry.contains(k))
            .cloned()
            .collect();
        for key in &unknown {
            self.per_task_override.remove(key);
        }
        unknown
    }
}

fn validate_budget(period: &str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidConfig(format!(
            "{} budget must be a non-negative number, got {}",
            period, value
        )))
    }
}
