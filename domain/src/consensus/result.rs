//! Consensus result types

use crate::core::provider::ProviderId;
use crate::execution::ExecutionOutcome;
use serde::{Deserialize, Serialize};

/// Where a merged recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "provider", rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Both providers made a similar recommendation
    Agreed,
    /// Only this provider made it
    Only(ProviderId),
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationSource::Agreed => write!(f, "Agreed"),
            RecommendationSource::Only(provider) => write!(f, "{} only", provider),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecommendation {
    pub text: String,
    pub source: RecommendationSource,
}

impl MergedRecommendation {
    pub fn agreed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: RecommendationSource::Agreed,
        }
    }

    pub fn only(provider: ProviderId, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: RecommendationSource::Only(provider),
        }
    }

    pub fn is_agreed(&self) -> bool {
        matches!(self.source, RecommendationSource::Agreed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    pub cost_a: f64,
    pub cost_b: f64,
    /// `|cost_a - cost_b|`
    pub delta: f64,
}

impl CostComparison {
    pub fn new(cost_a: f64, cost_b: f64) -> Self {
        Self {
            cost_a,
            cost_b,
            delta: (cost_a - cost_b).abs(),
        }
    }
}

/// Merged view over two independent provider outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub outcome_a: Option<ExecutionOutcome>,
    pub outcome_b: Option<ExecutionOutcome>,
    /// Lexical overlap of the two analyses, in `[0, 1]`
    pub agreement: f64,
    /// Agreed entries first, at most eight
    pub merged_recommendations: Vec<MergedRecommendation>,
    pub confidence: f64,
    pub cost_comparison: CostComparison,
}

impl ConsensusResult {
    pub fn agreed_count(&self) -> usize {
        self.merged_recommendations
            .iter()
            .filter(|r| r.is_agreed())
            .count()
    }

    /// Total spend across both providers.
    pub fn total_cost(&self) -> f64 {
        self.cost_comparison.cost_a + self.cost_comparison.cost_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_comparison_delta_is_absolute() {
        let comparison = CostComparison::new(0.02, 0.1);
        assert!((comparison.delta - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(RecommendationSource::Agreed.to_string(), "Agreed");
        assert_eq!(
            RecommendationSource::Only(ProviderId::Fast).to_string(),
            "fast only"
        );
    }

    #[test]
    fn test_source_serialization() {
        let value =
            serde_json::to_value(MergedRecommendation::only(ProviderId::Quality, "x")).unwrap();
        assert_eq!(value["source"]["kind"], "only");
        assert_eq!(value["source"]["provider"], "quality");
    }
}
