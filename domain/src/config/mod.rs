//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod output_format;
mod router_config;
mod validation;

pub use output_format::OutputFormat;
pub use router_config::{
    BudgetLimits, BudgetLimitsPatch, PatchReport, RouterConfig, RouterConfigPatch,
};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
