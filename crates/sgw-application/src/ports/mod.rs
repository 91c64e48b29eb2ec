//! Application Ports
//!
//! - **registry** - Compile-time adapter registry
//! - **services** - Inbound service contract

/// Adapter registry
pub mod registry;
/// Inbound service interfaces
pub mod services;

pub use registry::{
    TEXT_GENERATION_PROVIDERS, TextGenerationProviderConfig, TextGenerationProviderEntry,
    is_text_generation_provider_registered, list_text_generation_providers,
    resolve_text_generation_provider,
};
pub use services::{ProviderStats, SuggestionServiceInterface};
