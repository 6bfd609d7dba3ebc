//! Domain layer for insight-router
//!
//! This crate contains the core business rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Routing
//!
//! Every analytics task is served by one of two providers:
//!
//! - **Quality**: slower, more capable, more expensive
//! - **Fast**: cheaper and quicker, also able to produce visuals
//!
//! A task is either pinned to a provider or `auto`-routed. Auto tasks are
//! resolved from configuration overrides, then from learned performance
//! scores, then from a complexity heuristic.
//!
//! ## Performance history
//!
//! Each execution folds into a per (task, provider) record through an
//! exponential moving average (80% history, 20% new observation).
//!
//! ## Consensus
//!
//! Running both providers on the same payload yields a merged result with
//! a lexical agreement score, deduplicated recommendations and a blended
//! confidence.

pub mod config;
pub mod consensus;
pub mod core;
pub mod cost;
pub mod execution;
pub mod performance;
pub mod routing;
pub mod task;
pub mod util;

// Re-export commonly used types
pub use config::{
    BudgetLimits, BudgetLimitsPatch, ConfigIssue, ConfigIssueCode, OutputFormat, PatchReport,
    RouterConfig, RouterConfigPatch, Severity,
};
pub use consensus::{
    ConsensusEngine, ConsensusResult, CostComparison, MAX_MERGED_RECOMMENDATIONS,
    MergedRecommendation, RECOMMENDATION_MATCH_THRESHOLD, RecommendationSource,
};
pub use core::{
    error::DomainError,
    provider::{ProviderChoice, ProviderId},
};
pub use cost::{BudgetPeriod, BudgetStatus, CostLedger, PeriodStatus};
pub use execution::{ExecutionOutcome, ProviderReply, VisualAsset};
pub use performance::{Observation, PerformanceRecord, PerformanceTable};
pub use routing::{
    ProviderSelector, RoutingDecision, RoutingOptions, RoutingReason, ScoringBias,
};
pub use task::{Complexity, TaskDefinition, TaskRegistry};
