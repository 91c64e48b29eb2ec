//! Domain Port Interfaces
//!
//! Boundary contracts between the domain and the outer layers. Providers
//! and infrastructure implement them; the application layer depends only
//! on the traits.
//!
//! ## Organization
//!
//! - **infrastructure/** - Resilience primitives and usage accounting
//! - **providers/** - Vendor adapter port

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

pub use infrastructure::{
    CircuitBreaker, CircuitBreakerSnapshot, RateLimiter, RateLimiterSnapshot, UsageRecorder,
    UsageTotals,
};
pub use providers::{
    ChatMessage, ChatRole, HealthProbe, PromptFormat, ProviderCall, ProviderResponse,
    TextGenerationProvider, TokenUsage,
};
