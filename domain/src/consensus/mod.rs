//! Multi-provider consensus
//!
//! When a task is run against both providers, [`ConsensusEngine`] merges
//! the two outputs into a single [`ConsensusResult`]:
//!
//! ```text
//!   quality outcome ─┐
//!                    ├─▶ agreement score ─▶ confidence
//!   fast outcome ────┤
//!                    └─▶ merged recommendations (agreed → A-only → B-only, ≤ 8)
//! ```
//!
//! Consensus is only computed when both providers succeeded.

pub mod engine;
pub mod result;
pub mod text;

pub use engine::{ConsensusEngine, MAX_MERGED_RECOMMENDATIONS, RECOMMENDATION_MATCH_THRESHOLD};
pub use result::{ConsensusResult, CostComparison, MergedRecommendation, RecommendationSource};
