//! Weighted provider scoring
//!
//! ```text
//! score = 0.3*confidence + 0.2*success_rate + 0.2*satisfaction
//!       + 0.1*max(0, 1 - latency_ms/10000)
//!       + cost_weight*max(0, 1 - cost/1.0)
//!       (+ 0.2*confidence when quality has priority)
//! score = min(score * cost_efficiency_factor, 1.0)
//! ```

use crate::core::provider::ProviderId;
use crate::performance::PerformanceRecord;
use crate::task::Complexity;

const CONFIDENCE_WEIGHT: f64 = 0.3;
const SUCCESS_WEIGHT: f64 = 0.2;
const SATISFACTION_WEIGHT: f64 = 0.2;
const LATENCY_WEIGHT: f64 = 0.1;
const QUALITY_BONUS_WEIGHT: f64 = 0.2;

const COST_WEIGHT: f64 = 0.1;
const COST_PRIORITY_WEIGHT: f64 = 0.3;

/// Latency at which the latency term reaches zero.
const LATENCY_CEILING_MS: f64 = 10_000.0;
/// Average cost at which the cost term reaches zero.
const COST_CEILING: f64 = 1.0;

/// Flags that shift the scoring weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringBias {
    pub cost_priority: bool,
    pub quality_priority: bool,
}

/// Score a provider's history for a task. A missing record scores 0.
pub fn score(
    record: Option<&PerformanceRecord>,
    cost_efficiency_factor: f64,
    bias: ScoringBias,
) -> f64 {
    let Some(record) = record else {
        return 0.0;
    };

    let cost_weight = if bias.cost_priority {
        COST_PRIORITY_WEIGHT
    } else {
        COST_WEIGHT
    };

    let mut score = CONFIDENCE_WEIGHT * record.avg_confidence
        + SUCCESS_WEIGHT * record.success_rate
        + SATISFACTION_WEIGHT * record.user_satisfaction
        + LATENCY_WEIGHT * (1.0 - record.avg_response_time_ms / LATENCY_CEILING_MS).max(0.0)
        + cost_weight * (1.0 - record.avg_cost / COST_CEILING).max(0.0);

    if bias.quality_priority {
        score += QUALITY_BONUS_WEIGHT * record.avg_confidence;
    }

    (score * cost_efficiency_factor).min(1.0)
}

/// Quality wins only on a strictly greater score; ties go to Fast.
pub fn pick(quality_score: f64, fast_score: f64) -> ProviderId {
    if quality_score > fast_score {
        ProviderId::Quality
    } else {
        ProviderId::Fast
    }
}

/// Provider choice when no history exists for either provider.
pub fn default_heuristic(complexity: Complexity, cost_optimization: bool) -> ProviderId {
    match complexity {
        Complexity::Complex => ProviderId::Quality,
        Complexity::Simple => ProviderId::Fast,
        Complexity::Medium if cost_optimization => ProviderId::Fast,
        Complexity::Medium => ProviderId::Quality,
    }
}
