//! Provider Ports
//!
//! Contracts implemented by vendor adapters.

/// Text generation provider port
pub mod text_generation;

pub use text_generation::{
    ChatMessage, ChatRole, HealthProbe, PromptFormat, ProviderCall, ProviderResponse,
    TextGenerationProvider, TokenUsage,
};
