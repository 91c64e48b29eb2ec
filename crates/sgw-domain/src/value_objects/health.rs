//! Health Value Objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::HEALTH_STATUS_OK;

/// Result of probing one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Provider name
    pub provider_name: String,
    /// Whether the provider is usable
    pub ok: bool,
    /// Status code (`OK`, `HEALTH_CHECK_ERROR`, ...)
    pub status: String,
    /// Optional detail (error message, model count)
    pub detail: Option<String>,
    /// Probe duration in milliseconds
    pub latency_ms: u64,
}

impl HealthReport {
    /// Healthy report
    pub fn healthy(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            ok: true,
            status: HEALTH_STATUS_OK.to_string(),
            detail: None,
            latency_ms: 0,
        }
    }

    /// Unhealthy report with a status code
    pub fn failed(
        provider_name: impl Into<String>,
        status: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            ok: false,
            status: status.into(),
            detail,
            latency_ms: 0,
        }
    }

    /// Set the detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the probe duration
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

/// Overall gateway status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    /// Recommended provider is healthy
    Healthy,
    /// Recommended provider is unhealthy or none is available
    Degraded,
}

/// Aggregated health of every configured provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    /// Overall status
    pub status: SystemStatus,
    /// Provider the selector would pick without a request preference
    pub recommended: Option<String>,
    /// Per-provider reports
    pub providers: BTreeMap<String, HealthReport>,
}

impl HealthSummary {
    /// Whether the overall status is healthy
    pub fn is_healthy(&self) -> bool {
        self.status == SystemStatus::Healthy
    }
}
