//! Response parser port
//!
//! Extracting structure from free-form model output is heuristic and
//! fragile, so it sits behind this interface and can be swapped.

use serde::{Deserialize, Serialize};

/// Confidence assumed when a response does not state one
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Structured view of a raw provider response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResponse {
    /// Analysis body without the recommendation list
    pub analysis: String,
    pub recommendations: Vec<String>,
    /// Self-reported confidence in `[0, 1]`, when present
    pub confidence: Option<f64>,
}

impl ParsedResponse {
    pub fn confidence_or_default(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
    }
}

pub trait ResponseParser: Send + Sync {
    fn parse(&self, raw: &str) -> ParsedResponse;
}
