//! Text Generation Provider Registry
//!
//! Auto-registration system for text generation adapters using linkme
//! distributed slices. Adapters register themselves via
//! `#[linkme::distributed_slice]` and are discovered at startup.

use std::sync::Arc;
use std::time::Duration;

use sgw_domain::ports::providers::TextGenerationProvider;
use sgw_domain::value_objects::ProviderSettings;

/// Configuration for text generation adapter creation
///
/// Adapters use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct TextGenerationProviderConfig {
    /// Registered adapter name (e.g. "openai", "ollama", "null")
    pub adapter: String,
    /// Configured provider name the adapter runs as
    pub provider_name: String,
    /// Default model
    pub model: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Base URL of the provider API
    pub base_url: Option<String>,
    /// Per-request HTTP timeout
    pub timeout: Option<Duration>,
}

impl TextGenerationProviderConfig {
    /// Create a new config for the given adapter
    pub fn new(adapter: impl Into<String>) -> Self {
        let adapter = adapter.into();
        Self {
            provider_name: adapter.clone(),
            adapter,
            ..Default::default()
        }
    }

    /// Build the adapter config for a configured provider
    pub fn from_settings(provider_name: &str, settings: &ProviderSettings) -> Self {
        let mut config = Self::new(settings.adapter_name(provider_name))
            .with_provider_name(provider_name)
            .with_timeout(settings.timeout());
        if !settings.default_model.is_empty() {
            config.model = Some(settings.default_model.clone());
        }
        config.api_key = settings.resolve_api_key();
        config.base_url = settings.base_url.clone();
        config
    }

    /// Set the provider name
    pub fn with_provider_name(mut self, provider_name: impl Into<String>) -> Self {
        self.provider_name = provider_name.into();
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Registry entry for text generation adapters
///
/// Each adapter registers itself with this entry using
/// `#[linkme::distributed_slice(TEXT_GENERATION_PROVIDERS)]`.
pub struct TextGenerationProviderEntry {
    /// Unique adapter name (e.g. "openai", "ollama", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create an adapter instance
    pub factory:
        fn(&TextGenerationProviderConfig) -> Result<Arc<dyn TextGenerationProvider>, String>,
}

// Auto-collection via linkme distributed slices - adapters submit entries at compile time
#[linkme::distributed_slice]
pub static TEXT_GENERATION_PROVIDERS: [TextGenerationProviderEntry] = [..];

/// Resolve a text generation adapter by name from the registry
///
/// # Returns
/// * `Ok(Arc<dyn TextGenerationProvider>)` - Created adapter instance
/// * `Err(String)` - Adapter not registered or its factory failed
///
/// # Example
///
/// ```ignore
/// let config = TextGenerationProviderConfig::new("ollama")
///     .with_base_url("http://localhost:11434")
///     .with_model("llama3.1");
/// let provider = resolve_text_generation_provider(&config)?;
/// ```
pub fn resolve_text_generation_provider(
    config: &TextGenerationProviderConfig,
) -> Result<Arc<dyn TextGenerationProvider>, String> {
    for entry in TEXT_GENERATION_PROVIDERS {
        if entry.name == config.adapter {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = TEXT_GENERATION_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown text generation adapter '{}'. Available adapters: {:?}",
        config.adapter, available
    ))
}

/// Whether an adapter with this name is registered
pub fn is_text_generation_provider_registered(name: &str) -> bool {
    TEXT_GENERATION_PROVIDERS.iter().any(|e| e.name == name)
}

/// List all registered text generation adapters as (name, description)
pub fn list_text_generation_providers() -> Vec<(&'static str, &'static str)> {
    TEXT_GENERATION_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
