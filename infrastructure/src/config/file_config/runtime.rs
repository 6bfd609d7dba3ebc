//! Runtime sections from TOML (`[execution]`, `[storage]`, `[logging]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw execution configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Deadline for each provider call in seconds (0 disables it)
    pub timeout_seconds: Option<u64>,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: Some(120),
        }
    }
}

/// Raw storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding persisted router state
    pub state_dir: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Configured state directory, or `$XDG_DATA_HOME/insight-router`.
    pub fn resolve_state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("insight-router")
        })
    }
}

/// Raw logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL routing event log path; disabled when unset
    pub event_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_state_dir_wins() {
        let storage = FileStorageConfig {
            state_dir: Some(PathBuf::from("/var/lib/router")),
        };
        assert_eq!(storage.resolve_state_dir(), PathBuf::from("/var/lib/router"));
    }

    #[test]
    fn test_default_state_dir_is_namespaced() {
        let dir = FileStorageConfig::default().resolve_state_dir();
        assert!(dir.ends_with("insight-router"));
    }
}
