//! Execution results produced by provider invocations.

pub mod outcome;

pub use outcome::{ExecutionOutcome, ProviderReply, VisualAsset};
