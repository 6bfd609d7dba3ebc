//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("\"auto\" is a routing input, not an execution target")]
    AutoNotExecutable,

    #[error("Cost-efficiency factor for task {task_id} must be positive, got {factor}")]
    InvalidCostEfficiency { task_id: String, factor: f64 },

    #[error("Duplicate task id: {0}")]
    DuplicateTask(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Consensus requires two successful outcomes")]
    IncompleteOutcomes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::InvalidCostEfficiency {
            task_id: "quick-insights".to_string(),
            factor: 0.0,
        };
        assert_eq!(
            error.to_string(),
            "Cost-efficiency factor for task quick-insights must be positive, got 0"
        );
        assert_eq!(
            DomainError::UnknownProvider("gemini".to_string()).to_string(),
            "Unknown provider: gemini"
        );
    }
}
