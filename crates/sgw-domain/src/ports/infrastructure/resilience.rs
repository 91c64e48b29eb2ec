//! Resilience Ports
//!
//! Contracts for the per-provider circuit breaker and the per-conversation
//! rate limiter. The in-memory implementations are process-local; a
//! deployment spanning several instances can put a shared store behind the
//! same traits.

use serde::{Deserialize, Serialize};

/// Point-in-time view of a circuit breaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitBreakerSnapshot {
    /// Failures since the last success or reset
    pub failure_count: u32,
    /// Successes over the breaker lifetime
    pub success_count: u32,
    /// Whether calls are currently short-circuited
    pub is_open: bool,
    /// Milliseconds since the last failure, if any
    pub last_failure_ms_ago: Option<u64>,
    /// Configured failure ratio threshold
    pub error_rate_threshold: f64,
    /// Configured minimum sample
    pub min_sample: u32,
    /// Configured cooldown (milliseconds)
    pub cooldown_ms: u64,
}

/// Circuit breaker guarding one provider
///
/// Implementations must make every method safe under concurrent calls.
pub trait CircuitBreaker: Send + Sync {
    /// Whether calls must be short-circuited; resets the breaker once the
    /// cooldown has elapsed so a probe call can go through
    fn is_circuit_open(&self) -> bool;

    /// Record a successful call
    fn record_success(&self);

    /// Record a failed call
    fn record_failure(&self);

    /// Current state for stats
    fn snapshot(&self) -> CircuitBreakerSnapshot;
}

/// Point-in-time view of a rate limiter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterSnapshot {
    /// Requests admitted per key per window
    pub limit: u32,
    /// Window length (seconds)
    pub window_secs: u64,
    /// Keys currently tracked
    pub tracked_keys: u64,
}

/// Sliding-window rate limiter keyed by conversation
pub trait RateLimiter: Send + Sync {
    /// Admit one request for `key` if its window has room; the check and the
    /// record happen atomically for a given key
    fn can_make_request(&self, key: &str) -> bool;

    /// Current state for stats
    fn snapshot(&self) -> RateLimiterSnapshot;
}
