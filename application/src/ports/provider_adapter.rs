//! Provider adapter port
//!
//! Defines the interface for invoking a concrete AI provider.

use async_trait::async_trait;
use insight_domain::{ProviderId, ProviderReply, VisualAsset};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while invoking a provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("{provider} does not support {capability}")]
    Unsupported {
        provider: ProviderId,
        capability: &'static str,
    },

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// Adapter for one concrete provider
///
/// Implementations (HTTP clients, fakes) live outside the application layer.
/// Timeouts and cancellation are applied by the caller; adapters may also
/// enforce their own transport deadline.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter talks to
    fn id(&self) -> ProviderId;

    /// Run one analytics task
    async fn invoke(&self, task_id: &str, payload: &Value) -> Result<ProviderReply, ProviderError>;

    /// Generate a visual asset from a text brief.
    ///
    /// Only the fast provider offers this; the default rejects the call.
    async fn generate_visual(&self, _brief: &str) -> Result<VisualAsset, ProviderError> {
        Err(ProviderError::Unsupported {
            provider: self.id(),
            capability: "visual generation",
        })
    }
}
