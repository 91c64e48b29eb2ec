//! Circuit Breaker Tests

use std::time::Duration;

use sgw_domain::ports::infrastructure::CircuitBreaker;
use sgw_domain::value_objects::ProviderSettings;
use sgw_infrastructure::resilience::{CircuitBreakerConfig, InMemoryCircuitBreaker};

fn breaker(threshold: f64, min_sample: u32, cooldown: Duration) -> InMemoryCircuitBreaker {
    InMemoryCircuitBreaker::new(CircuitBreakerConfig {
        name: "openai".to_string(),
        error_rate_threshold: threshold,
        min_sample,
        cooldown,
    })
}

#[tokio::test(start_paused = true)]
async fn test_opens_after_four_failures_and_one_success() {
    let breaker = breaker(0.2, 5, Duration::from_secs(60));

    breaker.record_success();
    for _ in 0..4 {
        assert!(!breaker.is_circuit_open());
        breaker.record_failure();
    }

    assert!(breaker.is_circuit_open());
    let snapshot = breaker.snapshot();
    assert!(snapshot.is_open);
    assert_eq!(snapshot.failure_count, 4);
    assert_eq!(snapshot.success_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_closes_breaker_and_keeps_successes() {
    let breaker = breaker(0.2, 5, Duration::from_secs(60));
    breaker.record_success();
    for _ in 0..4 {
        breaker.record_failure();
    }
    assert!(breaker.is_circuit_open());

    tokio::time::advance(Duration::from_secs(60)).await;
    assert!(breaker.is_circuit_open(), "cooldown must be strictly exceeded");

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(!breaker.is_circuit_open());

    let snapshot = breaker.snapshot();
    assert!(!snapshot.is_open);
    assert_eq!(snapshot.failure_count, 0);
    assert_eq!(snapshot.success_count, 1);
    assert_eq!(snapshot.last_failure_ms_ago, Some(60_001));
}

#[tokio::test(start_paused = true)]
async fn test_reopens_with_earlier_successes_counted() {
    let breaker = breaker(0.2, 5, Duration::from_secs(60));
    breaker.record_success();
    for _ in 0..4 {
        breaker.record_failure();
    }
    tokio::time::advance(Duration::from_secs(61)).await;
    assert!(!breaker.is_circuit_open());

    // 4 failures against the retained success: 4/5 > 0.2
    for _ in 0..3 {
        breaker.record_failure();
        assert!(!breaker.is_circuit_open());
    }
    breaker.record_failure();

    assert!(breaker.is_circuit_open());
    assert_eq!(breaker.snapshot().success_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_success_closes_open_breaker() {
    let breaker = breaker(0.2, 5, Duration::from_secs(60));
    for _ in 0..5 {
        breaker.record_failure();
    }
    assert!(breaker.is_circuit_open());

    breaker.record_success();

    assert!(!breaker.is_circuit_open());
    assert_eq!(breaker.snapshot().failure_count, 0);
}

#[tokio::test(start_paused = true)]
async fn test_failure_refreshes_cooldown() {
    let breaker = breaker(0.2, 5, Duration::from_secs(60));
    for _ in 0..5 {
        breaker.record_failure();
    }

    tokio::time::advance(Duration::from_secs(40)).await;
    breaker.record_failure();
    tokio::time::advance(Duration::from_secs(40)).await;

    assert!(breaker.is_circuit_open());
    assert_eq!(breaker.snapshot().last_failure_ms_ago, Some(40_000));
}

#[test]
fn test_config_from_settings() {
    let settings = ProviderSettings::self_hosted("llama3.1");
    let config = CircuitBreakerConfig::from_settings("ollama", &settings);

    assert_eq!(config.name, "ollama");
    assert_eq!(config.error_rate_threshold, settings.error_rate_threshold);
    assert_eq!(config.min_sample, settings.min_sample);
    assert_eq!(config.cooldown, Duration::from_millis(settings.cooldown_ms));
}
