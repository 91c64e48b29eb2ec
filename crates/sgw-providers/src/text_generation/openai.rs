//! OpenAI Text Generation Provider
//!
//! Implements the TextGenerationProvider port using OpenAI's chat
//! completions API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use sgw_application::ports::registry::{
    TEXT_GENERATION_PROVIDERS, TextGenerationProviderConfig, TextGenerationProviderEntry,
};
use sgw_domain::error::{Error, Result};
use sgw_domain::ports::providers::{
    HealthProbe, PromptFormat, ProviderCall, ProviderResponse, TextGenerationProvider, TokenUsage,
};

use crate::constants::{CONTENT_TYPE_JSON, OPENAI_DEFAULT_BASE_URL, OPENAI_DEFAULT_MODEL};
use crate::text_generation::helpers::constructor;
use crate::utils::{HttpResponseUtils, JsonExt};

/// OpenAI text generation provider
///
/// Receives its HTTP client via constructor injection.
///
/// ## Example
///
/// ```rust,no_run
/// use sgw_providers::text_generation::OpenAITextGenerationProvider;
/// use reqwest::Client;
/// use std::time::Duration;
///
/// let provider = OpenAITextGenerationProvider::new(
///     "openai".to_string(),
///     "sk-your-api-key".to_string(),
///     None,
///     "gpt-4o-mini".to_string(),
///     Duration::from_secs(30),
///     Client::new(),
/// );
/// ```
pub struct OpenAITextGenerationProvider {
    name: String,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    http_client: Client,
}

impl OpenAITextGenerationProvider {
    /// Create a new OpenAI provider
    ///
    /// # Arguments
    /// * `name` - Configured provider name
    /// * `api_key` - OpenAI API key
    /// * `base_url` - Optional custom base URL (defaults to the OpenAI API)
    /// * `model` - Default model (e.g. "gpt-4o-mini")
    /// * `timeout` - Request timeout
    /// * `http_client` - Reqwest HTTP client
    pub fn new(
        name: String,
        api_key: String,
        base_url: Option<String>,
        model: String,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            name,
            api_key: api_key.trim().to_string(),
            base_url: constructor::get_effective_url(base_url.as_deref(), OPENAI_DEFAULT_BASE_URL),
            model,
            timeout,
            http_client,
        }
    }

    /// Base URL for this provider
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default model
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_payload(call: &ProviderCall) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = call
            .messages
            .iter()
            .map(|m| serde_json::json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        let mut payload = serde_json::json!({
            "model": call.model,
            "messages": messages,
            "temperature": call.temperature,
            "max_tokens": call.max_tokens,
            "stream": false,
        });
        if !call.stop.is_empty() {
            payload["stop"] = serde_json::json!(call.stop);
        }
        payload
    }

    fn parse_response(&self, data: &serde_json::Value) -> Result<ProviderResponse> {
        let choice = data
            .opt_array("choices")
            .and_then(|choices| choices.first())
            .ok_or_else(|| {
                Error::invalid_response(format!("{} response is missing choices", self.name))
            })?;

        let message = choice.get("message").ok_or_else(|| {
            Error::invalid_response(format!("{} choice is missing a message", self.name))
        })?;

        let usage = data.get("usage");
        Ok(ProviderResponse {
            text: message.opt_str("content").map(str::to_string),
            model: data.opt_str("model").map(str::to_string),
            usage: TokenUsage {
                input_tokens: usage.and_then(|u| u.opt_u64("prompt_tokens")),
                output_tokens: usage.and_then(|u| u.opt_u64("completion_tokens")),
            },
        })
    }
}

#[async_trait]
impl TextGenerationProvider for OpenAITextGenerationProvider {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn prompt_format(&self) -> PromptFormat {
        PromptFormat::Messages
    }

    async fn generate(&self, call: &ProviderCall) -> Result<ProviderResponse> {
        tracing::debug!(
            provider = %self.name,
            model = %call.model,
            max_tokens = call.max_tokens,
            "Sending chat completion request"
        );
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&Self::build_payload(call))
            .send()
            .await
            .map_err(|e| HttpResponseUtils::transport_error(&self.name, self.timeout, e))?;

        let data = HttpResponseUtils::check_and_parse(response, &self.name).await?;
        self.parse_response(&data)
    }

    async fn check_health(&self) -> Result<HealthProbe> {
        let response = self
            .http_client
            .get(format!("{}/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::transport_error(&self.name, self.timeout, e))?;

        let data = HttpResponseUtils::check_and_parse(response, &self.name).await?;
        Ok(HealthProbe {
            detail: data
                .opt_array("data")
                .map(|models| format!("{} models available", models.len())),
        })
    }

    fn stats(&self) -> serde_json::Value {
        serde_json::json!({
            "adapter": "openai",
            "base_url": self.base_url,
            "model": self.model,
            "timeout_ms": self.timeout.as_millis() as u64,
        })
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

/// Factory function for creating OpenAI provider instances
fn openai_factory(
    config: &TextGenerationProviderConfig,
) -> std::result::Result<Arc<dyn TextGenerationProvider>, String> {
    let api_key = constructor::require_api_key(config, "OpenAI")?;
    let model = constructor::get_effective_model(config.model.as_deref(), OPENAI_DEFAULT_MODEL);
    let timeout = constructor::effective_timeout(config);
    let http_client = constructor::build_http_client(timeout)?;

    Ok(Arc::new(OpenAITextGenerationProvider::new(
        config.provider_name.clone(),
        api_key,
        config.base_url.clone(),
        model,
        timeout,
        http_client,
    )))
}

#[linkme::distributed_slice(TEXT_GENERATION_PROVIDERS)]
static OPENAI_PROVIDER: TextGenerationProviderEntry = TextGenerationProviderEntry {
    name: "openai",
    description: "OpenAI chat completions (gpt-4o-mini, gpt-4o, gpt-4.1)",
    factory: openai_factory,
};
