//! Application Service Port Interfaces
//!
//! The inbound contract consumed by the suggestion-generation service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sgw_domain::ports::infrastructure::{CircuitBreakerSnapshot, RateLimiterSnapshot, UsageTotals};
use sgw_domain::value_objects::{
    GenerationRequest, GenerationResult, HealthSummary, ProviderDescriptor, ProviderSettings,
};

/// Monitoring view of one configured provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderStats {
    /// Selector descriptor
    pub descriptor: ProviderDescriptor,
    /// Breaker state
    pub circuit_breaker: CircuitBreakerSnapshot,
    /// Limiter state
    pub rate_limiter: RateLimiterSnapshot,
    /// Effective settings with secrets redacted
    pub config: ProviderSettings,
    /// Adapter-level stats, absent when the adapter failed to initialize
    pub adapter: Option<serde_json::Value>,
    /// Adapter initialization failure
    pub init_error: Option<String>,
    /// Accumulated usage
    pub usage: Option<UsageTotals>,
}

/// Suggestion Service Interface
///
/// `generate` never fails: every outcome is a `GenerationResult`.
#[async_trait]
pub trait SuggestionServiceInterface: Send + Sync {
    /// Produce one suggestion
    async fn generate(&self, request: GenerationRequest) -> GenerationResult;

    /// Probe every configured provider
    async fn check_health(&self) -> HealthSummary;

    /// Per-provider stats keyed by provider name
    fn get_stats(&self) -> BTreeMap<String, ProviderStats>;
}
