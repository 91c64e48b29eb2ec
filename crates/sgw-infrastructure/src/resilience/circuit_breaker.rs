//! Circuit breaker
//!
//! Error-ratio breaker guarding one provider. A success resets the failure
//! count and closes the circuit; a failure opens it once the failure ratio
//! exceeds the threshold over at least `min_sample` outcomes. Once the
//! cooldown has passed since the last failure, an open circuit closes with a
//! zeroed failure count so one probe call can go through. The success count
//! is kept.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sgw_domain::ports::infrastructure::{CircuitBreaker, CircuitBreakerSnapshot};
use sgw_domain::value_objects::ProviderSettings;
use tokio::time::Instant;
use tracing::{info, warn};

/// Circuit breaker configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitBreakerConfig {
    /// Circuit breaker name (the provider it guards)
    pub name: String,
    /// Failure ratio above which the circuit opens
    pub error_rate_threshold: f64,
    /// Minimum outcomes observed before the circuit may open
    pub min_sample: u32,
    /// Time the circuit stays open after the last failure
    pub cooldown: Duration,
}

impl CircuitBreakerConfig {
    /// Configuration for a configured provider
    pub fn from_settings(name: impl Into<String>, settings: &ProviderSettings) -> Self {
        Self {
            name: name.into(),
            error_rate_threshold: settings.error_rate_threshold,
            min_sample: settings.min_sample,
            cooldown: settings.cooldown(),
        }
    }
}

#[derive(Debug, Default)]
struct BreakerState {
    failure_count: u32,
    success_count: u32,
    last_failure_at: Option<Instant>,
    is_open: bool,
}

/// In-memory circuit breaker
///
/// State lives behind one mutex; every method holds it only for a few
/// arithmetic steps.
#[derive(Debug)]
pub struct InMemoryCircuitBreaker {
    config: CircuitBreakerConfig,
    state: Mutex<BreakerState>,
}

impl InMemoryCircuitBreaker {
    /// Create a closed circuit breaker
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: Mutex::new(BreakerState::default()),
        }
    }

    /// Breaker configuration
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    // A panic while holding the lock cannot leave the counters inconsistent
    fn state(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn should_open(&self, state: &BreakerState) -> bool {
        let total = state.failure_count.saturating_add(state.success_count);
        if total == 0 || total < self.config.min_sample {
            return false;
        }
        f64::from(state.failure_count) / f64::from(total) > self.config.error_rate_threshold
    }
}

impl CircuitBreaker for InMemoryCircuitBreaker {
    fn is_circuit_open(&self) -> bool {
        let mut state = self.state();
        if !state.is_open {
            return false;
        }

        let cooled_down = state
            .last_failure_at
            .is_none_or(|at| at.elapsed() > self.config.cooldown);
        if cooled_down {
            state.is_open = false;
            state.failure_count = 0;
            info!(
                circuit_breaker = %self.config.name,
                "Circuit breaker cooldown elapsed, allowing a probe call"
            );
            return false;
        }
        true
    }

    fn record_success(&self) {
        let mut state = self.state();
        state.success_count = state.success_count.saturating_add(1);
        state.failure_count = 0;
        if state.is_open {
            info!(circuit_breaker = %self.config.name, "Circuit breaker closed");
        }
        state.is_open = false;
    }

    fn record_failure(&self) {
        let mut state = self.state();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure_at = Some(Instant::now());

        if !state.is_open && self.should_open(&state) {
            state.is_open = true;
            warn!(
                circuit_breaker = %self.config.name,
                failure_count = state.failure_count,
                success_count = state.success_count,
                cooldown_ms = self.config.cooldown.as_millis() as u64,
                "Circuit breaker opened"
            );
        }
    }

    fn snapshot(&self) -> CircuitBreakerSnapshot {
        let state = self.state();
        CircuitBreakerSnapshot {
            failure_count: state.failure_count,
            success_count: state.success_count,
            is_open: state.is_open,
            last_failure_ms_ago: state
                .last_failure_at
                .map(|at| at.elapsed().as_millis() as u64),
            error_rate_threshold: self.config.error_rate_threshold,
            min_sample: self.config.min_sample,
            cooldown_ms: self.config.cooldown.as_millis() as u64,
        }
    }
}
