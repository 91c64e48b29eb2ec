//! Ollama Text Generation Provider
//!
//! Implements the TextGenerationProvider port against a self-hosted Ollama
//! server using its generate API.

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

use crate::constants::{CONTENT_TYPE_JSON, OLLAMA_DEFAULT_BASE_URL, OLLAMA_DEFAULT_MODEL};
use crate::text_generation::helpers::constructor;
use crate::utils::{HttpResponseUtils, JsonExt};

/// Ollama text generation provider
///
/// ## Example
///
/// ```rust,no_run
/// use sgw_providers::text_generation::OllamaTextGenerationProvider;
/// use reqwest::Client;
/// use std::time::Duration;
///
/// let provider = OllamaTextGenerationProvider::new(
///     "ollama".to_string(),
///     "http://localhost:11434".to_string(),
///     "llama3.1".to_string(),
///     Duration::from_secs(30),
///     Client::new(),
/// );
/// ```
pub struct OllamaTextGenerationProvider {
    name: String,
    base_url: String,
    model: String,
    timeout: Duration,
    http_client: Client,
}

impl OllamaTextGenerationProvider {
    /// Create a new Ollama provider
    pub fn new(
        name: String,
        base_url: String,
        model: String,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            name,
            base_url: constructor::get_effective_url(Some(&base_url), OLLAMA_DEFAULT_BASE_URL),
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
        let prompt = call.prompt.clone().unwrap_or_else(|| call.input_text());

        let mut options = serde_json::json!({
            "temperature": call.temperature,
            "num_predict": call.max_tokens,
        });
        if !call.stop.is_empty() {
            options["stop"] = serde_json::json!(call.stop);
        }

        serde_json::json!({
            "model": call.model,
            "prompt": prompt,
            "stream": false,
            "options": options,
        })
    }

    fn parse_response(&self, data: &serde_json::Value) -> Result<ProviderResponse> {
        let text = data.opt_str("response").ok_or_else(|| {
            Error::invalid_response(format!("{} response is missing 'response'", self.name))
        })?;

        Ok(ProviderResponse {
            text: Some(text.to_string()),
            model: data.opt_str("model").map(str::to_string),
            usage: TokenUsage {
                input_tokens: data.opt_u64("prompt_eval_count"),
                output_tokens: data.opt_u64("eval_count"),
            },
        })
    }
}

#[async_trait]
impl TextGenerationProvider for OllamaTextGenerationProvider {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn prompt_format(&self) -> PromptFormat {
        PromptFormat::Flat
    }

    async fn generate(&self, call: &ProviderCall) -> Result<ProviderResponse> {
        tracing::debug!(
            provider = %self.name,
            model = %call.model,
            max_tokens = call.max_tokens,
            "Sending generate request"
        );
        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
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
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::transport_error(&self.name, self.timeout, e))?;

        let data = HttpResponseUtils::check_and_parse(response, &self.name).await?;
        Ok(HealthProbe {
            detail: data
                .opt_array("models")
                .map(|models| format!("{} models available", models.len())),
        })
    }

    fn stats(&self) -> serde_json::Value {
        serde_json::json!({
            "adapter": "ollama",
            "base_url": self.base_url,
            "model": self.model,
            "timeout_ms": self.timeout.as_millis() as u64,
        })
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

/// Factory function for creating Ollama provider instances
fn ollama_factory(
    config: &TextGenerationProviderConfig,
) -> std::result::Result<Arc<dyn TextGenerationProvider>, String> {
    let base_url =
        constructor::get_effective_url(config.base_url.as_deref(), OLLAMA_DEFAULT_BASE_URL);
    let model = constructor::get_effective_model(config.model.as_deref(), OLLAMA_DEFAULT_MODEL);
    let timeout = constructor::effective_timeout(config);
    let http_client = constructor::build_http_client(timeout)?;

    Ok(Arc::new(OllamaTextGenerationProvider::new(
        config.provider_name.clone(),
        base_url,
        model,
        timeout,
        http_client,
    )))
}

#[linkme::distributed_slice(TEXT_GENERATION_PROVIDERS)]
static OLLAMA_PROVIDER: TextGenerationProviderEntry = TextGenerationProviderEntry {
    name: "ollama",
    description: "Self-hosted Ollama server (llama3.1, mistral, qwen2.5)",
    factory: ollama_factory,
};
