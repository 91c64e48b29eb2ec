//! Infrastructure Ports
//!
//! Contracts for the stateful services the gateway leans on: resilience
//! primitives and usage accounting.

/// Usage accounting
pub mod metrics;
/// Circuit breaker and rate limiter
pub mod resilience;

pub use metrics::{UsageRecorder, UsageTotals};
pub use resilience::{CircuitBreaker, CircuitBreakerSnapshot, RateLimiter, RateLimiterSnapshot};
