//! Durable key/value storage port
//!
//! Router state is kept as whole JSON blobs under fixed keys. Every
//! mutation rewrites the full blob; there are no partial writes.

use thiserror::Error;

/// Key of the persisted [`RouterConfig`](insight_domain::RouterConfig)
pub const ROUTER_CONFIG_KEY: &str = "router_config";
/// Key of the persisted performance record list
pub const PERFORMANCE_METRICS_KEY: &str = "performance_metrics";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key '{0}'")]
    InvalidKey(String),
}

/// Synchronous blob store
pub trait StateStore: Send + Sync {
    /// Read a blob. `Ok(None)` when nothing has been stored yet.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace a blob.
    fn save(&self, key: &str, json: &str) -> Result<(), StoreError>;
}
