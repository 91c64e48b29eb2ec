//! # Suggestion Gateway
//!
//! Resilient orchestration of text-generation providers for customer-support
//! reply suggestions.
//!
//! ## Example
//!
//! ```ignore
//! use sgw::infrastructure::{ConfigLoader, init_app};
//! use sgw::application::ports::services::SuggestionServiceInterface;
//! use sgw::domain::GenerationRequest;
//!
//! let context = init_app(ConfigLoader::new().load()?)?;
//! let result = context
//!     .gateway()
//!     .generate(GenerationRequest::new("conv-42", "Do you ship to Porto?"))
//!     .await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Value objects, port traits and errors
//! - `application` - Prompt builder, sanitizer, usage meter, registry, retrying client
//! - `infrastructure` - Config, logging, breaker, limiter, usage ledger, bootstrap
//! - `providers` - HTTP adapters registered at link time

// Force-link sgw-providers so adapter registrations are included
extern crate sgw_providers;

pub mod cli;

/// Domain layer - core types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use sgw_domain::*;
}

/// Application layer - use cases and domain services
pub mod application {
    pub use sgw_application::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
pub mod infrastructure {
    pub use sgw_infrastructure::*;
}

/// Provider adapters
pub mod providers {
    pub use sgw_providers::*;
}

pub use domain::{Error, GenerationRequest, GenerationResult, Result};
pub use infrastructure::{AppConfig, AppContext, ConfigLoader, init_app};
