//! Anthropic Text Generation Provider
//!
//! Implements the TextGenerationProvider port using Anthropic's messages API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use sgw_application::ports::registry::{
    TEXT_GENERATION_PROVIDERS, TextGenerationProviderConfig, TextGenerationProviderEntry,
};
use sgw_domain::error::{Error, Result};
use sgw_domain::ports::providers::{
    ChatRole, HealthProbe, PromptFormat, ProviderCall, ProviderResponse, TextGenerationProvider,
    TokenUsage,
};

use crate::constants::{
    ANTHROPIC_API_VERSION, ANTHROPIC_DEFAULT_BASE_URL, ANTHROPIC_DEFAULT_MODEL,
    ANTHROPIC_EMPTY_CONVERSATION_MESSAGE, CONTENT_TYPE_JSON,
};
use crate::text_generation::helpers::constructor;
use crate::utils::{HttpResponseUtils, JsonExt};

/// Anthropic text generation provider
pub struct AnthropicTextGenerationProvider {
    name: String,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    http_client: Client,
}

impl AnthropicTextGenerationProvider {
    /// Create a new Anthropic provider
    ///
    /// # Arguments
    /// * `name` - Configured provider name
    /// * `api_key` - Anthropic API key
    /// * `base_url` - Optional custom base URL (defaults to the Anthropic API)
    /// * `model` - Default model (e.g. "claude-3-5-haiku-latest")
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
            base_url: constructor::get_effective_url(
                base_url.as_deref(),
                ANTHROPIC_DEFAULT_BASE_URL,
            ),
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

    // System messages go to the top-level `system` field; the API rejects an
    // empty message list.
    fn build_payload(call: &ProviderCall) -> serde_json::Value {
        let system = call
            .messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut messages: Vec<serde_json::Value> = call
            .messages
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .map(|m| serde_json::json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();
        if messages.is_empty() {
            messages.push(serde_json::json!({
                "role": "user",
                "content": ANTHROPIC_EMPTY_CONVERSATION_MESSAGE,
            }));
        }

        let mut payload = serde_json::json!({
            "model": call.model,
            "messages": messages,
            "temperature": call.temperature,
            "max_tokens": call.max_tokens,
            "stream": false,
        });
        if !system.is_empty() {
            payload["system"] = serde_json::json!(system);
        }
        if !call.stop.is_empty() {
            payload["stop_sequences"] = serde_json::json!(call.stop);
        }
        payload
    }

    fn parse_response(&self, data: &serde_json::Value) -> Result<ProviderResponse> {
        let blocks = data.opt_array("content").ok_or_else(|| {
            Error::invalid_response(format!("{} response is missing content", self.name))
        })?;

        let text: String = blocks
            .iter()
            .filter(|block| block.opt_str("type") == Some("text"))
            .filter_map(|block| block.opt_str("text"))
            .collect();

        let usage = data.get("usage");
        Ok(ProviderResponse {
            text: (!text.is_empty()).then_some(text),
            model: data.opt_str("model").map(str::to_string),
            usage: TokenUsage {
                input_tokens: usage.and_then(|u| u.opt_u64("input_tokens")),
                output_tokens: usage.and_then(|u| u.opt_u64("output_tokens")),
            },
        })
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .timeout(self.timeout)
    }
}

#[async_trait]
impl TextGenerationProvider for AnthropicTextGenerationProvider {
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
            "Sending messages request"
        );
        let response = self
            .request(self.http_client.post(format!("{}/messages", self.base_url)))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .json(&Self::build_payload(call))
            .send()
            .await
            .map_err(|e| HttpResponseUtils::transport_error(&self.name, self.timeout, e))?;

        let data = HttpResponseUtils::check_and_parse(response, &self.name).await?;
        self.parse_response(&data)
    }

    async fn check_health(&self) -> Result<HealthProbe> {
        let response = self
            .request(self.http_client.get(format!("{}/models", self.base_url)))
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
            "adapter": "anthropic",
            "base_url": self.base_url,
            "model": self.model,
            "api_version": ANTHROPIC_API_VERSION,
            "timeout_ms": self.timeout.as_millis() as u64,
        })
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

/// Factory function for creating Anthropic provider instances
fn anthropic_factory(
    config: &TextGenerationProviderConfig,
) -> std::result::Result<Arc<dyn TextGenerationProvider>, String> {
    let api_key = constructor::require_api_key(config, "Anthropic")?;
    let model =
        constructor::get_effective_model(config.model.as_deref(), ANTHROPIC_DEFAULT_MODEL);
    let timeout = constructor::effective_timeout(config);
    let http_client = constructor::build_http_client(timeout)?;

    Ok(Arc::new(AnthropicTextGenerationProvider::new(
        config.provider_name.clone(),
        api_key,
        config.base_url.clone(),
        model,
        timeout,
        http_client,
    )))
}

#[linkme::distributed_slice(TEXT_GENERATION_PROVIDERS)]
static ANTHROPIC_PROVIDER: TextGenerationProviderEntry = TextGenerationProviderEntry {
    name: "anthropic",
    description: "Anthropic messages API (claude-3-5-haiku, claude-3-5-sonnet)",
    factory: anthropic_factory,
};
