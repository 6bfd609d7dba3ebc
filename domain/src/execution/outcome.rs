//! Execution value objects
//!
//! - [`ProviderReply`] - what a provider adapter hands back on success
//! - [`ExecutionOutcome`] - one invocation's result, successful or not
//! - [`VisualAsset`] - output of the fast provider's visual capability

use crate::core::provider::ProviderId;
use crate::performance::Observation;
use crate::util::{clamp_unit, non_negative};
use serde::{Deserialize, Serialize};

/// Successful reply from a provider adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderReply {
    pub analysis_text: String,
    pub recommendations: Vec<String>,
    pub confidence: f64,
    pub cost_incurred: f64,
    pub tokens_used: u64,
    /// Milliseconds since epoch
    pub timestamp: u64,
}

/// Result of invoking one provider for one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub provider_id: ProviderId,
    pub analysis_text: String,
    pub recommendations: Vec<String>,
    pub confidence: f64,
    pub cost_incurred: f64,
    pub tokens_used: u64,
    /// Milliseconds since epoch
    pub timestamp: u64,
    /// Wall-clock latency of the adapter call
    pub response_time_ms: u64,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl ExecutionOutcome {
    /// Creates a successful outcome from an adapter reply.
    pub fn success(provider_id: ProviderId, reply: ProviderReply, response_time_ms: u64) -> Self {
        Self {
            provider_id,
            analysis_text: reply.analysis_text,
            recommendations: reply.recommendations,
            confidence: clamp_unit(reply.confidence),
            cost_incurred: non_negative(reply.cost_incurred),
            tokens_used: reply.tokens_used,
            timestamp: reply.timestamp,
            response_time_ms,
            succeeded: true,
            error_detail: None,
        }
    }

    /// Creates a failed outcome; nothing was produced and nothing was spent.
    pub fn failure(
        provider_id: ProviderId,
        error: impl Into<String>,
        timestamp: u64,
        response_time_ms: u64,
    ) -> Self {
        Self {
            provider_id,
            analysis_text: String::new(),
            recommendations: Vec::new(),
            confidence: 0.0,
            cost_incurred: 0.0,
            tokens_used: 0,
            timestamp,
            response_time_ms,
            succeeded: false,
            error_detail: Some(error.into()),
        }
    }

    /// What this outcome contributes to performance history.
    ///
    /// Satisfaction is approximated by confidence until the user gives
    /// explicit feedback.
    pub fn observation(&self) -> Observation {
        if !self.succeeded {
            return Observation::failure(self.response_time_ms as f64);
        }
        Observation {
            cost: self.cost_incurred,
            confidence: self.confidence,
            response_time_ms: self.response_time_ms as f64,
            success: true,
            satisfaction: self.confidence,
        }
    }
}

/// Generated visual asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualAsset {
    /// URL or storage reference of the asset
    pub asset_ref: String,
    pub cost: f64,
}
