//! Common helpers for text generation adapters

use std::time::Duration;

use reqwest::Client;
use sgw_application::ports::registry::TextGenerationProviderConfig;

use crate::constants::HTTP_REQUEST_TIMEOUT_SECS;
use crate::http::HttpClientConfig;

/// Constructor patterns shared by the adapter factories
pub mod constructor {
    use super::*;

    /// Effective base URL without a trailing slash
    pub fn get_effective_url(provided_url: Option<&str>, default_url: &str) -> String {
        provided_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(default_url)
            .trim_end_matches('/')
            .to_string()
    }

    /// Effective model name
    pub fn get_effective_model(provided_model: Option<&str>, default_model: &str) -> String {
        provided_model
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .unwrap_or(default_model)
            .to_string()
    }

    /// API key from the config, or an error naming the provider
    pub fn require_api_key(
        config: &TextGenerationProviderConfig,
        label: &str,
    ) -> Result<String, String> {
        config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| format!("{label} API key is not configured"))
    }

    /// Request timeout from the config, or the default
    pub fn effective_timeout(config: &TextGenerationProviderConfig) -> Duration {
        config
            .timeout
            .unwrap_or(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
    }

    /// HTTP client with the shared pooling settings
    pub fn build_http_client(timeout: Duration) -> Result<Client, String> {
        HttpClientConfig::with_timeout(timeout).build_client()
    }
}
