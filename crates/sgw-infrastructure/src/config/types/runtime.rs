//! Runtime tuning for the gateway's stateful services

use crate::constants::{HEALTH_PROBE_TIMEOUT_MS, RATE_LIMITER_KEY_TTL_SECS, RATE_LIMITER_MAX_KEYS};
use serde::{Deserialize, Serialize};
use sgw_domain::constants::DEFAULT_FALLBACK_TEXT;
use std::time::Duration;

/// Bounds on the per-provider conversation key map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimiterConfig {
    /// Idle time before a conversation window is dropped (seconds)
    pub key_ttl_secs: u64,
    /// Maximum conversation windows tracked per provider
    pub max_keys: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            key_ttl_secs: RATE_LIMITER_KEY_TTL_SECS,
            max_keys: RATE_LIMITER_MAX_KEYS,
        }
    }
}

impl RateLimiterConfig {
    /// Idle TTL as a duration
    pub fn key_ttl(&self) -> Duration {
        Duration::from_secs(self.key_ttl_secs)
    }
}

/// Health probing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Timeout for one provider probe (milliseconds)
    pub probe_timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: HEALTH_PROBE_TIMEOUT_MS,
        }
    }
}

impl HealthConfig {
    /// Probe timeout as a duration
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Output sanitization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Text returned when a provider produced nothing usable
    pub fallback_text: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
        }
    }
}
