//! # Suggestion Gateway - Provider Implementations
//!
//! Vendor adapters for the text generation port defined in `sgw-domain`.
//! Adapters register themselves in the application-layer registry through
//! linkme, so linking this crate is enough to make them resolvable.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Text Generation | `TextGenerationProvider` | OpenAI, Anthropic, Ollama, Null |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! sgw-providers = { version = "0.1", default-features = false, features = ["generation-ollama"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! // Force the linker to keep the registrations
//! extern crate sgw_providers;
//!
//! let config = TextGenerationProviderConfig::new("ollama").with_model("llama3.1");
//! let provider = resolve_text_generation_provider(&config)?;
//! ```

// Re-export sgw-domain types commonly used with providers
pub use sgw_domain::error::{Error, Result};
pub use sgw_domain::ports::providers::TextGenerationProvider;

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// HTTP client configuration for API-based adapters
pub mod http;

/// Text generation adapters
///
/// Implements `TextGenerationProvider` for the supported vendors.
pub mod text_generation;
