//! Performance record and its moving-average update rule

use crate::core::provider::ProviderId;
use crate::util::{clamp_unit, non_negative};
use serde::{Deserialize, Serialize};

/// Weight kept from the existing average on each update.
pub const HISTORY_WEIGHT: f64 = 0.8;
/// Weight given to a new observation on each update.
pub const OBSERVATION_WEIGHT: f64 = 0.2;

/// A single measured execution, fed into [`PerformanceRecord::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub cost: f64,
    pub confidence: f64,
    pub response_time_ms: f64,
    pub success: bool,
    pub satisfaction: f64,
}

impl Observation {
    /// Observation for a failed call: only latency is meaningful.
    pub fn failure(response_time_ms: f64) -> Self {
        Self {
            cost: 0.0,
            confidence: 0.0,
            response_time_ms,
            success: false,
            satisfaction: 0.0,
        }
    }

    fn success_value(&self) -> f64 {
        if self.success { 1.0 } else { 0.0 }
    }
}

/// Historical performance of one provider on one task.
///
/// Probability fields stay within `[0, 1]`; cost and latency are never
/// negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub task_id: String,
    pub provider_id: ProviderId,
    pub avg_cost: f64,
    pub avg_confidence: f64,
    pub avg_response_time_ms: f64,
    pub success_rate: f64,
    pub user_satisfaction: f64,
    /// Number of observations blended into this record
    #[serde(default)]
    pub samples: u64,
}

impl PerformanceRecord {
    /// First record for a key: the observation is stored verbatim.
    pub fn from_observation(
        task_id: impl Into<String>,
        provider_id: ProviderId,
        observation: &Observation,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            provider_id,
            avg_cost: non_negative(observation.cost),
            avg_confidence: clamp_unit(observation.confidence),
            avg_response_time_ms: non_negative(observation.response_time_ms),
            success_rate: observation.success_value(),
            user_satisfaction: clamp_unit(observation.satisfaction),
            samples: 1,
        }
    }

    /// Blend an observation into every field (`old * 0.8 + new * 0.2`).
    pub fn apply(&mut self, observation: &Observation) {
        self.avg_cost = blend(self.avg_cost, non_negative(observation.cost));
        self.avg_confidence = clamp_unit(blend(
            self.avg_confidence,
            clamp_unit(observation.confidence),
        ));
        self.avg_response_time_ms = blend(
            self.avg_response_time_ms,
            non_negative(observation.response_time_ms),
        );
        self.success_rate = clamp_unit(blend(self.success_rate, observation.success_value()));
        self.user_satisfaction = clamp_unit(blend(
            self.user_satisfaction,
            clamp_unit(observation.satisfaction),
        ));
        self.samples = self.samples.saturating_add(1);
    }

    /// Blend explicit user feedback into `user_satisfaction` only.
    pub fn apply_satisfaction(&mut self, satisfaction: f64) {
        let satisfaction = clamp_unit(satisfaction);
        self.user_satisfaction = clamp_unit(blend(self.user_satisfaction, satisfaction));
    }
}

fn blend(old: f64, observed: f64) -> f64 {
    old * HISTORY_WEIGHT + observed * OBSERVATION_WEIGHT
}
