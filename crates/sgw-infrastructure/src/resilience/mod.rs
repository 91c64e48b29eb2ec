//! Resilience primitives
//!
//! In-memory, process-local implementations of the breaker and limiter
//! ports. A multi-instance deployment needs sticky routing or a shared
//! store behind the same traits.

pub mod circuit_breaker;
pub mod rate_limiter;

pub use circuit_breaker::{CircuitBreakerConfig, InMemoryCircuitBreaker};
pub use rate_limiter::{InMemoryRateLimiter, RateLimiterSettings};
