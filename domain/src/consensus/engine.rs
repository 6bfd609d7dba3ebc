//! Consensus merge of two provider outcomes
//!
//! # Algorithm
//!
//! 1. **Agreement**: significant words (lowercase, longer than three
//!    characters) of both analyses, `|A ∩ B| / max(|A|, |B|)`
//! 2. **Recommendations**: each of A's recommendations is paired with its
//!    most similar counterpart in B (word-level Jaccard). Above the
//!    threshold the pair becomes one agreed entry; otherwise A's entry is
//!    kept as A-only. B's entries with no counterpart in A at or above the
//!    threshold follow as B-only. The list is capped at eight entries.
//! 3. **Confidence**: `avg(conf_a, conf_b) * (0.7 + 0.3 * agreement)`

use super::result::{ConsensusResult, CostComparison, MergedRecommendation};
use super::text::{jaccard, overlap_ratio, significant_words};
use crate::core::error::DomainError;
use crate::execution::ExecutionOutcome;
use crate::util::clamp_unit;

/// Similarity above which two recommendations count as the same.
pub const RECOMMENDATION_MATCH_THRESHOLD: f64 = 0.6;
/// Maximum number of merged recommendations.
pub const MAX_MERGED_RECOMMENDATIONS: usize = 8;

const CONFIDENCE_FLOOR: f64 = 0.7;
const AGREEMENT_WEIGHT: f64 = 0.3;

/// Merges two successful outcomes into one agreement-scored result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsensusEngine;

impl ConsensusEngine {
    pub fn new() -> Self {
        Self
    }

    /// Merge two outcomes. Both must have succeeded.
    pub fn merge(
        &self,
        outcome_a: ExecutionOutcome,
        outcome_b: ExecutionOutcome,
    ) -> Result<ConsensusResult, DomainError> {
        if !outcome_a.succeeded || !outcome_b.succeeded {
            return Err(DomainError::IncompleteOutcomes);
        }

        let agreement = Self::agreement(&outcome_a.analysis_text, &outcome_b.analysis_text);
        let merged_recommendations = Self::merge_recommendations(&outcome_a, &outcome_b);

        let average = (outcome_a.confidence + outcome_b.confidence) / 2.0;
        let confidence = clamp_unit(average * (CONFIDENCE_FLOOR + agreement * AGREEMENT_WEIGHT));

        let cost_comparison =
            CostComparison::new(outcome_a.cost_incurred, outcome_b.cost_incurred);

        Ok(ConsensusResult {
            outcome_a: Some(outcome_a),
            outcome_b: Some(outcome_b),
            agreement,
            merged_recommendations,
            confidence,
            cost_comparison,
        })
    }

    /// Lexical agreement between two analyses, in `[0, 1]`.
    pub fn agreement(text_a: &str, text_b: &str) -> f64 {
        clamp_unit(overlap_ratio(
            &significant_words(text_a),
            &significant_words(text_b),
        ))
    }

    fn merge_recommendations(
        outcome_a: &ExecutionOutcome,
        outcome_b: &ExecutionOutcome,
    ) -> Vec<MergedRecommendation> {
        let recs_a = &outcome_a.recommendations;
        let recs_b = &outcome_b.recommendations;
        let mut agreed = Vec::new();
        let mut only_a = Vec::new();

        for rec_a in recs_a {
            let best = recs_b
                .iter()
                .map(|rec_b| jaccard(rec_a, rec_b))
                .fold(0.0, f64::max);

            if best > RECOMMENDATION_MATCH_THRESHOLD {
                agreed.push(MergedRecommendation::agreed(rec_a.clone()));
            } else {
                only_a.push(MergedRecommendation::only(outcome_a.provider_id, rec_a.clone()));
            }
        }

        // Any near match in A, including one at exactly the threshold, hides a B entry.
        let only_b = recs_b
            .iter()
            .filter(|rec_b| {
                !recs_a
                    .iter()
                    .any(|rec_a| jaccard(rec_a, rec_b) >= RECOMMENDATION_MATCH_THRESHOLD)
            })
            .map(|rec_b| MergedRecommendation::only(outcome_b.provider_id, rec_b.clone()));

        agreed
            .into_iter()
            .chain(only_a)
            .chain(only_b)
            .take(MAX_MERGED_RECOMMENDATIONS)
            .collect()
    }
}
