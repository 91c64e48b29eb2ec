//! Main application configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sgw_domain::value_objects::{ModelPrice, PromptPolicy, ProviderSettings};
use sgw_providers::constants::{
    ANTHROPIC_DEFAULT_MODEL, OLLAMA_DEFAULT_BASE_URL, OLLAMA_DEFAULT_MODEL, OPENAI_DEFAULT_MODEL,
};

pub use super::logging::LoggingConfig;
pub use super::runtime::{HealthConfig, RateLimiterConfig, SanitizerConfig};
use crate::constants::{ANTHROPIC_API_KEY_ENV, OPENAI_API_KEY_ENV};

/// Main application configuration
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [providers.ollama]
/// base_url = "http://gpu-box:11434"
/// default_model = "qwen2.5"
///
/// [providers.openai]
/// enabled = false
///
/// [pricing."gpt-4o-mini"]
/// input_per_1k = 0.00015
/// output_per_1k = 0.0006
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Configured providers keyed by name
    pub providers: BTreeMap<String, ProviderSettings>,

    /// Per-model prices added to or replacing the built-in table
    pub pricing: BTreeMap<String, ModelPrice>,

    /// Rate limiter key map bounds
    pub rate_limiter: RateLimiterConfig,

    /// Health probing
    pub health: HealthConfig,

    /// Default prompt policy for requests that carry none
    pub prompt: PromptPolicy,

    /// Output sanitization
    pub sanitizer: SanitizerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            providers: default_providers(),
            pricing: BTreeMap::new(),
            rate_limiter: RateLimiterConfig::default(),
            health: HealthConfig::default(),
            prompt: PromptPolicy::default(),
            sanitizer: SanitizerConfig::default(),
        }
    }
}

/// Providers configured out of the box
///
/// Hosted providers stay disabled until their API key variable is set.
pub fn default_providers() -> BTreeMap<String, ProviderSettings> {
    let mut providers = BTreeMap::new();

    let mut ollama = ProviderSettings::self_hosted(OLLAMA_DEFAULT_MODEL)
        .with_base_url(OLLAMA_DEFAULT_BASE_URL);
    ollama.display_name = Some("Ollama (self-hosted)".to_string());
    providers.insert("ollama".to_string(), ollama);

    let mut openai = ProviderSettings::hosted(OPENAI_DEFAULT_MODEL);
    openai.display_name = Some("OpenAI".to_string());
    openai.api_key_env = Some(OPENAI_API_KEY_ENV.to_string());
    openai.priority = 20;
    openai.supported_models = ["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini", "gpt-4.1"]
        .into_iter()
        .map(str::to_string)
        .collect();
    providers.insert("openai".to_string(), openai);

    let mut anthropic = ProviderSettings::hosted(ANTHROPIC_DEFAULT_MODEL);
    anthropic.display_name = Some("Anthropic".to_string());
    anthropic.api_key_env = Some(ANTHROPIC_API_KEY_ENV.to_string());
    anthropic.priority = 30;
    anthropic.supported_models = ["claude-3-5-haiku-latest", "claude-3-5-sonnet-latest"]
        .into_iter()
        .map(str::to_string)
        .collect();
    providers.insert("anthropic".to_string(), anthropic);

    providers
}
