//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod providers;
mod runtime;

pub use output::FileOutputConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig};
pub use runtime::{FileExecutionConfig, FileLoggingConfig, FileStorageConfig};

use insight_domain::{ConfigIssue, ConfigIssueCode, RouterConfig, TaskRegistry};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Initial router config, used until a config has been persisted
    pub router: RouterConfig,
    /// Provider call settings
    pub execution: FileExecutionConfig,
    /// Persisted state location
    pub storage: FileStorageConfig,
    /// Provider endpoints and pricing
    pub providers: FileProvidersConfig,
    /// Routing event log
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Empty endpoint / model / key variable names
    /// 2. Negative or non-finite prices and budgets
    /// 3. A zero execution timeout
    /// 4. `[router.per_task_override]` keys that name no known task
    pub fn validate(&self, registry: &TaskRegistry) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1 + 2. Provider sections
        self.providers.validate(&mut issues);

        // 2. Budgets
        for (field, value) in [
            ("router.budget_limits.daily", self.router.budget_limits.daily),
            ("router.budget_limits.monthly", self.router.budget_limits.monthly),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::NegativeValue {
                        field: field.to_string(),
                    },
                    format!("{} must be a non-negative number, got {}", field, value),
                ));
            }
        }

        // 3. Timeout
        if self.execution.timeout_seconds == Some(0) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout,
                "execution.timeout_seconds is 0; provider calls will have no deadline",
            ));
        }

        // 4. Overrides
        for task_id in self.router.per_task_override.keys() {
            if !registry.contains(task_id) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownTaskOverride {
                        task_id: task_id.clone(),
                    },
                    format!(
                        "router.per_task_override: unknown task '{}' will be ignored",
                        task_id
                    ),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_domain::{ProviderChoice, ProviderId};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[router]
default_provider = "fast"
cost_optimization = false
quality_first = true

[router.budget_limits]
daily = 5.0
monthly = 100.0

[router.per_task_override]
trend-forecast = "fast"

[execution]
timeout_seconds = 45

[storage]
state_dir = "/tmp/insight-router"

[logging]
event_log = "/tmp/insight-router/events.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.router.default_provider,
            ProviderChoice::Provider(ProviderId::Fast)
        );
        assert!(!config.router.cost_optimization);
        assert!(config.router.quality_first);
        assert_eq!(config.router.budget_limits.daily, 5.0);
        assert_eq!(
            config.router.override_for("trend-forecast"),
            Some(ProviderId::Fast)
        );
        assert_eq!(config.execution.timeout_seconds, Some(45));
        assert!(config.logging.event_log.is_some());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[router]
quality_first = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.router.quality_first);
        // Defaults should apply
        assert!(config.router.cost_optimization);
        assert_eq!(config.execution.timeout_seconds, Some(120));
        assert!(config.storage.state_dir.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate(&TaskRegistry::with_defaults()).is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut config = FileConfig::default();
        config.router.budget_limits.daily = -3.0;
        config.execution.timeout_seconds = Some(0);
        config
            .router
            .per_task_override
            .insert("retired-task".to_string(), ProviderId::Fast);
        config.providers.quality.endpoint = String::new();

        let issues = config.validate(&TaskRegistry::with_defaults());
        assert_eq!(issues.len(), 4);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
        assert!(issues
            .iter()
            .any(|i| i.code == ConfigIssueCode::ZeroTimeout));
    }
}
