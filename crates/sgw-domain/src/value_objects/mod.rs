//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`GenerationRequest`] | One suggestion request with its conversation context |
//! | [`GenerationResult`] | Discriminated outcome of a `generate` call |
//! | [`ProviderSettings`] | Per-provider configuration and resilience knobs |
//! | [`HealthReport`] | Probe result for one provider |

/// Generation requests and results
pub mod generation;
/// Provider health
pub mod health;
/// Provider settings and descriptors
pub mod provider;

pub use generation::{
    ConversationTurn, ErrorKind, GenerationRequest, GenerationResult, PromptPolicy, TurnRole,
    Usage,
};
pub use health::{HealthReport, HealthSummary, SystemStatus};
pub use provider::{ModelPrice, ProviderDescriptor, ProviderSettings};
