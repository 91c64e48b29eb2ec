//! HTTP Response Utilities
//!
//! Maps HTTP outcomes onto the domain error taxonomy so the retry loop can
//! tell transient failures from terminal ones.

use std::time::Duration;

use reqwest::Response;
use sgw_domain::error::{Error, Result};
use tracing::debug;

use crate::constants::ERROR_BODY_MAX_CHARS;

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// | Outcome | Error |
    /// |---------|-------|
    /// | 401, 403 | `ProviderUnavailable` |
    /// | 429, 5xx | retryable `Provider` |
    /// | other 4xx | non-retryable `Provider` |
    /// | undecodable body | `InvalidResponse` |
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value> {
        let status = response.status();
        debug!(provider = provider_name, status = status.as_u16(), "Provider response received");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let body = Self::truncate(&body);
            let code = status.as_u16();

            return Err(match code {
                401 | 403 => Error::provider_unavailable(format!(
                    "{provider_name} authentication failed ({code}): {body}"
                )),
                429 => Error::provider(format!(
                    "{provider_name} rate limit exceeded (429): {body}"
                )),
                500..=599 => Error::provider(format!(
                    "{provider_name} server error ({code}): {body}"
                )),
                _ => Error::provider_rejected(format!(
                    "{provider_name} request failed ({code}): {body}"
                )),
            });
        }

        response.json().await.map_err(|e| {
            Error::invalid_response(format!("{provider_name} response parse failed: {e}"))
        })
    }

    /// Map a transport failure (connect, reset, timeout) to a retryable error
    pub fn transport_error(provider_name: &str, timeout: Duration, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::network_with_source(
                format!("{provider_name} request timed out after {timeout:?}"),
                error,
            )
        } else {
            Error::network_with_source(format!("{provider_name} request failed: {error}"), error)
        }
    }

    fn truncate(body: &str) -> &str {
        match body.char_indices().nth(ERROR_BODY_MAX_CHARS) {
            Some((index, _)) => &body[..index],
            None => body,
        }
    }
}
