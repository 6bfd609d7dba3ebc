//! OpenAI-compatible HTTP provider adapter.
//!
//! Sends one chat completion per task, parses the reply through the
//! injected [`ResponseParser`] and prices it from the token usage with the
//! configured per-1k rates.

use super::prompt::{system_prompt, user_prompt};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use insight_application::ports::clock::Clock;
use insight_application::ports::provider_adapter::{ProviderAdapter, ProviderError};
use insight_application::ports::response_parser::ResponseParser;
use insight_domain::{ProviderId, ProviderReply, VisualAsset};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

pub struct HttpProviderAdapter {
    id: ProviderId,
    client: reqwest::Client,
    config: FileProviderConfig,
    parser: Arc<dyn ResponseParser>,
    clock: Arc<dyn Clock>,
}

impl HttpProviderAdapter {
    pub fn new(
        id: ProviderId,
        config: FileProviderConfig,
        parser: Arc<dyn ResponseParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            id,
            client: reqwest::Client::new(),
            config,
            parser,
            clock,
        }
    }

    /// API key from the configured environment variable, read per call so
    /// commands that never reach a provider work without credentials.
    fn api_key(&self) -> Result<String, ProviderError> {
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::MissingCredentials(self.config.api_key_env.clone()))
    }

    async fn post(&self, url: &str, body: &Value) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(self.api_key()?)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::RequestFailed(format!(
                "{} API error ({}): {}",
                self.id, status, error_text
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl ProviderAdapter for HttpProviderAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn invoke(&self, task_id: &str, payload: &Value) -> Result<ProviderReply, ProviderError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt(self.id) },
                { "role": "user", "content": user_prompt(task_id, payload) }
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        debug!("POST {} model={} task={}", self.config.endpoint, self.config.model, task_id);
        let response: ChatResponse = self
            .post(&self.config.endpoint, &body)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedReply(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::MalformedReply("no content in choices".to_string()))?;

        let usage = response.usage.unwrap_or_default();
        let cost = self
            .config
            .estimate_cost(usage.prompt_tokens, usage.completion_tokens);
        let tokens_used = if usage.total_tokens > 0 {
            usage.total_tokens
        } else {
            usage.prompt_tokens + usage.completion_tokens
        };

        info!(
            "{} usage: model={} prompt_tokens={} completion_tokens={} cost={:.5}",
            self.id, self.config.model, usage.prompt_tokens, usage.completion_tokens, cost
        );

        let parsed = self.parser.parse(&content);
        Ok(ProviderReply {
            confidence: parsed.confidence_or_default(),
            analysis_text: parsed.analysis,
            recommendations: parsed.recommendations,
            cost_incurred: cost,
            tokens_used,
            timestamp: self.clock.now_millis(),
        })
    }

    async fn generate_visual(&self, brief: &str) -> Result<VisualAsset, ProviderError> {
        let endpoint = match (&self.config.image_endpoint, self.id.supports_visuals()) {
            (Some(endpoint), true) => endpoint,
            _ => {
                return Err(ProviderError::Unsupported {
                    provider: self.id,
                    capability: "visual generation",
                });
            }
        };

        let body = json!({ "prompt": brief, "n": 1, "size": "1024x1024" });
        let response: ImageResponse = self
            .post(endpoint, &body)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedReply(e.to_string()))?;

        let asset_ref = response
            .data
            .into_iter()
            .find_map(|image| image.url)
            .ok_or_else(|| ProviderError::MalformedReply("no image url in reply".to_string()))?;

        Ok(VisualAsset {
            asset_ref,
            cost: self.config.image_price,
        })
    }
}
