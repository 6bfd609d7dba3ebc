//! Task definition value objects

use crate::core::provider::{ProviderChoice, ProviderId};
use serde::{Deserialize, Serialize};

/// How demanding a task is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable catalogue entry describing how a task is routed.
///
/// A task is either pinned to a concrete provider or left to `auto`, in which
/// case the selector consults overrides, history and the default heuristic.
///
/// # Example
///
/// ```
/// use insight_domain::{Complexity, ProviderId, TaskDefinition};
///
/// let task = TaskDefinition::auto("trend-forecast", Complexity::Complex)
///     .with_fallback(ProviderId::Fast)
///     .with_cost_efficiency(0.9);
///
/// assert!(task.primary_provider.is_auto());
/// assert_eq!(task.fallback_provider, Some(ProviderId::Fast));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Unique task identifier
    pub id: String,
    pub complexity: Complexity,
    /// Pinned provider or `auto`
    pub primary_provider: ProviderChoice,
    /// Provider suggested when the primary is unsuitable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_provider: Option<ProviderId>,
    /// Multiplier applied to the routing score (strictly positive)
    pub cost_efficiency_factor: f64,
    /// Short human-readable description
    #[serde(default)]
    pub description: String,
}

impl TaskDefinition {
    /// Creates a task pinned to a concrete provider.
    pub fn pinned(id: impl Into<String>, complexity: Complexity, provider: ProviderId) -> Self {
        Self::new(id, complexity, ProviderChoice::Provider(provider))
    }

    /// Creates a task routed by the selector.
    pub fn auto(id: impl Into<String>, complexity: Complexity) -> Self {
        Self::new(id, complexity, ProviderChoice::Auto)
    }

    pub fn new(id: impl Into<String>, complexity: Complexity, primary: ProviderChoice) -> Self {
        Self {
            id: id.into(),
            complexity,
            primary_provider: primary,
            fallback_provider: None,
            cost_efficiency_factor: 1.0,
            description: String::new(),
        }
    }

    pub fn with_fallback(mut self, provider: ProviderId) -> Self {
        self.fallback_provider = Some(provider);
        self
    }

    /// Sets the cost-efficiency factor. Validity is checked by
    /// [`TaskRegistry::new`](super::TaskRegistry::new).
    pub fn with_cost_efficiency(mut self, factor: f64) -> Self {
        self.cost_efficiency_factor = factor;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns `true` when routing never enters scoring for this task.
    pub fn is_pinned(&self) -> bool {
        !self.primary_provider.is_auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_task() {
        let task = TaskDefinition::pinned("quick-insights", Complexity::Simple, ProviderId::Fast);
        assert!(task.is_pinned());
        assert_eq!(task.primary_provider.concrete(), Some(ProviderId::Fast));
        assert_eq!(task.cost_efficiency_factor, 1.0);
    }

    #[test]
    fn test_complexity_serializes_lowercase() {
        let json = serde_json::to_string(&Complexity::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn test_definition_json_shape() {
        let task = TaskDefinition::auto("competitor-review", Complexity::Medium);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["primary_provider"], "auto");
        assert!(value.get("fallback_provider").is_none());
    }
}
