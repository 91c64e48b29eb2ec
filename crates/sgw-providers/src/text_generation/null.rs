//! Null Text Generation Provider
//!
//! Offline adapter for development and tests. It performs no I/O and answers
//! with a deterministic reply derived from the last line of the input.

use std::sync::Arc;

use async_trait::async_trait;

use sgw_application::ports::registry::{
    TEXT_GENERATION_PROVIDERS, TextGenerationProviderConfig, TextGenerationProviderEntry,
};
use sgw_domain::error::Result;
use sgw_domain::ports::providers::{
    ChatRole, HealthProbe, PromptFormat, ProviderCall, ProviderResponse, TextGenerationProvider,
    TokenUsage,
};

/// Model name reported when none is configured
const NULL_DEFAULT_MODEL: &str = "null";

/// Null text generation provider
#[derive(Debug, Clone)]
pub struct NullTextGenerationProvider {
    name: String,
    model: String,
}

impl NullTextGenerationProvider {
    /// Create a null provider
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }

    // Echoes the latest customer line of a flat prompt or the latest user
    // message of a chat call.
    fn reply_for(call: &ProviderCall) -> String {
        let latest = match &call.prompt {
            Some(prompt) => prompt
                .lines()
                .rev()
                .find_map(|line| line.strip_prefix("Customer:"))
                .map(str::trim)
                .map(str::to_string),
            None => call
                .messages
                .iter()
                .rev()
                .find(|m| m.role == ChatRole::User)
                .map(|m| m.content.trim().to_string()),
        };
        match latest {
            Some(text) if !text.is_empty() => format!("Thanks for your message. We received: {text}"),
            _ => "Hello! How can we help you today?".to_string(),
        }
    }
}

impl Default for NullTextGenerationProvider {
    fn default() -> Self {
        Self::new("null", NULL_DEFAULT_MODEL)
    }
}

#[async_trait]
impl TextGenerationProvider for NullTextGenerationProvider {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn prompt_format(&self) -> PromptFormat {
        PromptFormat::Flat
    }

    async fn generate(&self, call: &ProviderCall) -> Result<ProviderResponse> {
        let text = Self::reply_for(call);
        Ok(ProviderResponse {
            usage: TokenUsage {
                input_tokens: None,
                output_tokens: None,
            },
            model: Some(call.model.clone()),
            text: Some(text),
        })
    }

    async fn check_health(&self) -> Result<HealthProbe> {
        Ok(HealthProbe {
            detail: Some("offline".to_string()),
        })
    }

    fn stats(&self) -> serde_json::Value {
        serde_json::json!({
            "adapter": "null",
            "model": self.model,
        })
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn null_factory(
    config: &TextGenerationProviderConfig,
) -> std::result::Result<Arc<dyn TextGenerationProvider>, String> {
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| NULL_DEFAULT_MODEL.to_string());
    Ok(Arc::new(NullTextGenerationProvider::new(
        config.provider_name.clone(),
        model,
    )))
}

#[linkme::distributed_slice(TEXT_GENERATION_PROVIDERS)]
static NULL_PROVIDER: TextGenerationProviderEntry = TextGenerationProviderEntry {
    name: "null",
    description: "Offline echo adapter for development and tests",
    factory: null_factory,
};
