//! Provider configuration from TOML (`[providers.quality]` / `[providers.fast]`)

use insight_domain::{ConfigIssue, ConfigIssueCode, ProviderId};
use serde::{Deserialize, Serialize};

/// Connection and pricing settings for one OpenAI-compatible provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Chat completions endpoint URL
    pub endpoint: String,
    /// Model name sent with each request
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Price per 1000 prompt tokens
    pub input_price_per_1k: f64,
    /// Price per 1000 completion tokens
    pub output_price_per_1k: f64,
    /// Max tokens per response
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f64,
    /// Image generation endpoint (fast provider only)
    pub image_endpoint: Option<String>,
    /// Flat price per generated image
    pub image_price: f64,
}

impl FileProviderConfig {
    /// Defaults for the deep-reasoning provider.
    pub fn quality_defaults() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            input_price_per_1k: 0.0025,
            output_price_per_1k: 0.01,
            max_tokens: 2000,
            temperature: 0.3,
            image_endpoint: None,
            image_price: 0.0,
        }
    }

    /// Defaults for the cheap, creative provider.
    pub fn fast_defaults() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            input_price_per_1k: 0.00015,
            output_price_per_1k: 0.0006,
            max_tokens: 1500,
            temperature: 0.7,
            image_endpoint: Some("https://api.openai.com/v1/images/generations".to_string()),
            image_price: 0.04,
        }
    }

    /// Estimated cost of a call with the given token usage.
    pub fn estimate_cost(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        prompt_tokens as f64 / 1000.0 * self.input_price_per_1k
            + completion_tokens as f64 / 1000.0 * self.output_price_per_1k
    }

    fn validate(&self, provider: ProviderId, issues: &mut Vec<ConfigIssue>) {
        let section = format!("providers.{}", provider);

        for (field, value) in [
            ("endpoint", &self.endpoint),
            ("model", &self.model),
            ("api_key_env", &self.api_key_env),
        ] {
            if value.trim().is_empty() {
                let field = format!("{}.{}", section, field);
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: field.clone(),
                    },
                    format!("{} cannot be empty", field),
                ));
            }
        }

        for (field, value) in [
            ("input_price_per_1k", self.input_price_per_1k),
            ("output_price_per_1k", self.output_price_per_1k),
            ("image_price", self.image_price),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                let field = format!("{}.{}", section, field);
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::NegativeValue {
                        field: field.clone(),
                    },
                    format!("{} must be a non-negative number, got {}", field, value),
                ));
            }
        }
    }
}

/// Both provider sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    #[serde(default = "FileProviderConfig::quality_defaults")]
    pub quality: FileProviderConfig,
    #[serde(default = "FileProviderConfig::fast_defaults")]
    pub fast: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            quality: FileProviderConfig::quality_defaults(),
            fast: FileProviderConfig::fast_defaults(),
        }
    }
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self::quality_defaults()
    }
}

impl FileProvidersConfig {
    pub fn get(&self, provider: ProviderId) -> &FileProviderConfig {
        match provider {
            ProviderId::Quality => &self.quality,
            ProviderId::Fast => &self.fast,
        }
    }

    pub(super) fn validate(&self, issues: &mut Vec<ConfigIssue>) {
        self.quality.validate(ProviderId::Quality, issues);
        self.fast.validate(ProviderId::Fast, issues);
    }
}
