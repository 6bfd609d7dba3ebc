//! Provider routing
//!
//! [`ProviderSelector`] is a pure function over the task catalogue, the
//! router config and the performance table; it has no side effects.

pub mod scoring;
pub mod selector;

pub use scoring::ScoringBias;
pub use selector::{ProviderSelector, RoutingDecision, RoutingOptions, RoutingReason};
