//! Use Cases
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`ProviderRegistry`] | Configured providers and the fallback selector |
//! | [`RetryingClient`] | One `generate` request end to end |
//! | [`HealthAggregator`] | Concurrent provider probes |
//! | [`SuggestionGateway`] | Inbound facade |

/// Inbound facade
pub mod gateway;
/// Provider health aggregation
pub mod health_aggregator;
/// Provider registry and selector
pub mod provider_registry;
/// Retrying client
pub mod retrying_client;

pub use gateway::SuggestionGateway;
pub use health_aggregator::HealthAggregator;
pub use provider_registry::{ProviderHandle, ProviderRegistry};
pub use retrying_client::{
    RetryingClient, UNRESOLVED_PROVIDER, backoff_delay, clamp_max_tokens, clamp_temperature,
};
