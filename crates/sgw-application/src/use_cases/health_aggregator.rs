//! Health Aggregator
//!
//! Probes every configured provider concurrently and derives the overall
//! gateway status from the recommended provider.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use sgw_domain::constants::{
    HEALTH_STATUS_CHECK_ERROR, HEALTH_STATUS_DISABLED, HEALTH_STATUS_UNAVAILABLE,
};
use sgw_domain::ports::providers::TextGenerationProvider;
use sgw_domain::value_objects::{HealthReport, HealthSummary, SystemStatus};
use tokio::time::Instant;
use tracing::debug;

use super::provider_registry::{ProviderHandle, ProviderRegistry};

/// Probes provider health
pub struct HealthAggregator {
    registry: Arc<ProviderRegistry>,
    probe_timeout: Duration,
}

impl HealthAggregator {
    /// Create an aggregator bounding each probe by `probe_timeout`
    pub fn new(registry: Arc<ProviderRegistry>, probe_timeout: Duration) -> Self {
        Self {
            registry,
            probe_timeout,
        }
    }

    /// Probe every provider
    ///
    /// A failing or hanging probe only marks its own entry unhealthy.
    pub async fn check_all(&self) -> HealthSummary {
        let probes = self
            .registry
            .handles()
            .iter()
            .map(|handle| self.check_one(handle));
        let providers: BTreeMap<String, HealthReport> = join_all(probes)
            .await
            .into_iter()
            .map(|report| (report.provider_name.clone(), report))
            .collect();

        let recommended = self.registry.recommended().ok().map(|h| h.name().to_string());
        let healthy = recommended
            .as_ref()
            .and_then(|name| providers.get(name))
            .is_some_and(|report| report.ok);

        HealthSummary {
            status: if healthy {
                SystemStatus::Healthy
            } else {
                SystemStatus::Degraded
            },
            recommended,
            providers,
        }
    }

    async fn check_one(&self, handle: &ProviderHandle) -> HealthReport {
        let name = handle.name();

        if !handle.settings().enabled {
            return HealthReport::failed(name, HEALTH_STATUS_DISABLED, None);
        }

        let Some(adapter) = handle.adapter() else {
            return HealthReport::failed(
                name,
                HEALTH_STATUS_UNAVAILABLE,
                handle.init_error().map(str::to_string),
            );
        };

        if !handle.is_enabled() {
            return HealthReport::failed(
                name,
                HEALTH_STATUS_UNAVAILABLE,
                Some("credentials are not configured".to_string()),
            );
        }

        let started = Instant::now();
        let outcome = tokio::time::timeout(self.probe_timeout, adapter.check_health()).await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let report = match outcome {
            Ok(Ok(probe)) => {
                let report = HealthReport::healthy(name);
                match probe.detail {
                    Some(detail) => report.with_detail(detail),
                    None => report,
                }
            }
            Ok(Err(error)) => {
                HealthReport::failed(name, HEALTH_STATUS_CHECK_ERROR, Some(error.to_string()))
            }
            Err(_) => HealthReport::failed(
                name,
                HEALTH_STATUS_CHECK_ERROR,
                Some(format!(
                    "health probe timed out after {} ms",
                    self.probe_timeout.as_millis()
                )),
            ),
        };

        debug!(provider = name, ok = report.ok, status = %report.status, latency_ms, "Provider probed");
        report.with_latency_ms(latency_ms)
    }
}
