//! Provider Value Objects
//!
//! Per-provider settings supplied by the configuration source and the
//! descriptor the selector exposes for each configured provider.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for one configured provider
///
/// Supplied at process start by the configuration collaborator and never
/// mutated by the gateway. Resilience knobs live here so shared logic never
/// hardcodes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Whether the provider may be selected at all
    pub enabled: bool,
    /// Registered adapter implementing the provider (defaults to the config key)
    pub adapter: Option<String>,
    /// Human-readable name
    pub display_name: Option<String>,
    /// Fallback order; lower values are tried first
    pub priority: u32,
    /// Self-hosted model server (preferred by the fallback chain, never billed)
    pub self_hosted: bool,
    /// Base URL of the provider API
    pub base_url: Option<String>,
    /// Inline API key
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Whether the provider refuses to work without an API key
    pub requires_api_key: bool,
    /// Model used when the request names none or an unsupported one
    pub default_model: String,
    /// Models accepted from requests; empty accepts any model
    pub supported_models: Vec<String>,
    /// Per-attempt HTTP timeout (milliseconds)
    pub timeout_ms: u64,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base backoff between attempts (milliseconds)
    pub backoff_ms: u64,
    /// Output token ceiling
    pub max_tokens_out: u32,
    /// Maximum sanitized output length (characters)
    pub max_output_length: usize,
    /// Requests admitted per conversation per minute
    pub rate_limit_per_minute: u32,
    /// Failure ratio above which the breaker opens
    pub error_rate_threshold: f64,
    /// Minimum outcomes observed before the breaker may open
    pub min_sample: u32,
    /// Time the breaker stays open after the last failure (milliseconds)
    pub cooldown_ms: u64,
    /// Stop sequences sent with each call
    pub stop: Vec<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::hosted("")
    }
}

impl ProviderSettings {
    /// Tight defaults for hosted SaaS providers
    pub fn hosted(default_model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            adapter: None,
            display_name: None,
            priority: 100,
            self_hosted: false,
            base_url: None,
            api_key: None,
            api_key_env: None,
            requires_api_key: true,
            default_model: default_model.into(),
            supported_models: Vec::new(),
            timeout_ms: 30_000,
            max_retries: 2,
            backoff_ms: 500,
            max_tokens_out: 300,
            max_output_length: 1_000,
            rate_limit_per_minute: 20,
            error_rate_threshold: 0.2,
            min_sample: 5,
            cooldown_ms: 60_000,
            stop: Vec::new(),
        }
    }

    /// Looser defaults for self-hosted model servers
    pub fn self_hosted(default_model: impl Into<String>) -> Self {
        Self {
            self_hosted: true,
            priority: 10,
            requires_api_key: false,
            timeout_ms: 60_000,
            max_retries: 3,
            backoff_ms: 250,
            max_tokens_out: 512,
            max_output_length: 2_000,
            rate_limit_per_minute: 120,
            error_rate_threshold: 0.5,
            min_sample: 10,
            cooldown_ms: 15_000,
            ..Self::hosted(default_model)
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set an inline API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the adapter implementing this provider
    pub fn with_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.adapter = Some(adapter.into());
        self
    }

    /// API key from inline config or the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        let inline = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        inline.or_else(|| {
            self.api_key_env
                .as_deref()
                .and_then(|var| std::env::var(var).ok())
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty())
        })
    }

    /// Whether the credentials this provider needs are present
    pub fn credentials_present(&self) -> bool {
        !self.requires_api_key || self.resolve_api_key().is_some()
    }

    /// Adapter name, falling back to the provider name
    pub fn adapter_name<'a>(&'a self, provider_name: &'a str) -> &'a str {
        self.adapter.as_deref().unwrap_or(provider_name)
    }

    /// Per-attempt HTTP timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Breaker cooldown
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Copy safe to expose in stats output
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api_key.is_some() {
            copy.api_key = Some("***".to_string());
        }
        copy
    }
}

/// Descriptor of a configured provider as seen by the selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Configuration key
    pub name: String,
    /// Human-readable name
    pub display_name: String,
    /// Model used by default
    pub default_model: String,
    /// Models accepted from requests, in preference order
    pub supported_models: Vec<String>,
    /// Enabled predicate evaluated against configuration and environment
    pub is_enabled: bool,
    /// Self-hosted model server
    pub self_hosted: bool,
}

/// Price of a hosted model in USD per 1000 tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    /// USD per 1000 input tokens
    pub input_per_1k: f64,
    /// USD per 1000 output tokens
    pub output_per_1k: f64,
}

impl ModelPrice {
    /// Create a price entry
    pub const fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }
}
