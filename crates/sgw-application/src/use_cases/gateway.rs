//! Suggestion Gateway
//!
//! Inbound facade combining the retrying client, the health aggregator and
//! per-provider stats.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use sgw_domain::ports::infrastructure::UsageRecorder;
use sgw_domain::ports::providers::TextGenerationProvider;
use sgw_domain::value_objects::{GenerationRequest, GenerationResult, HealthSummary};

use super::health_aggregator::HealthAggregator;
use super::provider_registry::ProviderRegistry;
use super::retrying_client::RetryingClient;
use crate::ports::services::{ProviderStats, SuggestionServiceInterface};

/// Suggestion gateway service
pub struct SuggestionGateway {
    registry: Arc<ProviderRegistry>,
    client: RetryingClient,
    health: HealthAggregator,
    recorder: Arc<dyn UsageRecorder>,
}

impl SuggestionGateway {
    /// Create a gateway from its collaborators
    pub fn new(
        registry: Arc<ProviderRegistry>,
        client: RetryingClient,
        health: HealthAggregator,
        recorder: Arc<dyn UsageRecorder>,
    ) -> Self {
        Self {
            registry,
            client,
            health,
            recorder,
        }
    }

    /// Provider registry
    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }
}

#[async_trait]
impl SuggestionServiceInterface for SuggestionGateway {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult {
        self.client.generate(&request).await
    }

    async fn check_health(&self) -> HealthSummary {
        self.health.check_all().await
    }

    fn get_stats(&self) -> BTreeMap<String, ProviderStats> {
        self.registry
            .handles()
            .iter()
            .map(|handle| {
                let stats = ProviderStats {
                    descriptor: handle.descriptor(),
                    circuit_breaker: handle.breaker().snapshot(),
                    rate_limiter: handle.limiter().snapshot(),
                    config: handle.settings().redacted(),
                    adapter: handle.adapter().map(|adapter| adapter.stats()),
                    init_error: handle.init_error().map(str::to_string),
                    usage: self.recorder.totals(handle.name()),
                };
                (handle.name().to_string(), stats)
            })
            .collect()
    }
}
