//! Tests for health aggregation

use std::sync::Arc;
use std::time::Duration;

use sgw_application::use_cases::{HealthAggregator, ProviderRegistry};
use sgw_domain::constants::{
    HEALTH_STATUS_CHECK_ERROR, HEALTH_STATUS_DISABLED, HEALTH_STATUS_OK,
    HEALTH_STATUS_UNAVAILABLE,
};
use sgw_domain::value_objects::{ProviderSettings, SystemStatus};

use crate::test_utils::{HealthScript, ScriptedProvider, broken_handle, hosted, scripted_handle};

fn aggregator(registry: ProviderRegistry) -> HealthAggregator {
    HealthAggregator::new(Arc::new(registry), Duration::from_secs(5))
}

#[tokio::test(start_paused = true)]
async fn test_all_healthy() {
    let (ollama, _) = scripted_handle(
        "ollama",
        ProviderSettings::self_hosted("llama3.1"),
        Arc::new(ScriptedProvider::new("ollama")),
    );
    let (openai, _) = scripted_handle(
        "openai",
        hosted("gpt-4o-mini"),
        Arc::new(ScriptedProvider::new("openai")),
    );

    let summary = aggregator(ProviderRegistry::new(vec![ollama, openai]))
        .check_all()
        .await;

    assert_eq!(summary.status, SystemStatus::Healthy);
    assert_eq!(summary.recommended.as_deref(), Some("ollama"));
    assert_eq!(summary.providers.len(), 2);
    assert!(summary.providers.values().all(|r| r.status == HEALTH_STATUS_OK));
}

#[tokio::test(start_paused = true)]
async fn test_failing_probe_only_marks_its_entry() {
    let (ollama, _) = scripted_handle(
        "ollama",
        ProviderSettings::self_hosted("llama3.1"),
        Arc::new(ScriptedProvider::new("ollama")),
    );
    let (openai, _) = scripted_handle(
        "openai",
        hosted("gpt-4o-mini"),
        Arc::new(ScriptedProvider::new("openai").with_health(HealthScript::Failing)),
    );

    let summary = aggregator(ProviderRegistry::new(vec![ollama, openai]))
        .check_all()
        .await;

    assert!(summary.is_healthy());
    let openai = &summary.providers["openai"];
    assert!(!openai.ok);
    assert_eq!(openai.status, HEALTH_STATUS_CHECK_ERROR);
    assert!(openai.detail.as_deref().unwrap().contains("connection refused"));
    assert!(summary.providers["ollama"].ok);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_probe_times_out() {
    let (ollama, _) = scripted_handle(
        "ollama",
        ProviderSettings::self_hosted("llama3.1"),
        Arc::new(ScriptedProvider::new("ollama").with_health(HealthScript::Hanging)),
    );

    let summary = aggregator(ProviderRegistry::new(vec![ollama]))
        .check_all()
        .await;

    assert_eq!(summary.status, SystemStatus::Degraded);
    let report = &summary.providers["ollama"];
    assert_eq!(report.status, HEALTH_STATUS_CHECK_ERROR);
    assert!(report.detail.as_deref().unwrap().contains("timed out"));
}

#[tokio::test(start_paused = true)]
async fn test_unhealthy_recommended_provider_degrades() {
    let (ollama, _) = scripted_handle(
        "ollama",
        ProviderSettings::self_hosted("llama3.1"),
        Arc::new(ScriptedProvider::new("ollama").with_health(HealthScript::Failing)),
    );
    let (openai, _) = scripted_handle(
        "openai",
        hosted("gpt-4o-mini"),
        Arc::new(ScriptedProvider::new("openai")),
    );

    let summary = aggregator(ProviderRegistry::new(vec![ollama, openai]))
        .check_all()
        .await;

    assert_eq!(summary.status, SystemStatus::Degraded);
    assert!(summary.providers["openai"].ok);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_and_unavailable_providers_are_listed() {
    let (disabled, _) = scripted_handle(
        "anthropic",
        ProviderSettings {
            enabled: false,
            ..hosted("claude")
        },
        Arc::new(ScriptedProvider::new("anthropic")),
    );
    let broken = broken_handle("openai", hosted("gpt-4o-mini"), "OpenAI API key is not configured");
    let (ollama, _) = scripted_handle(
        "ollama",
        ProviderSettings::self_hosted("llama3.1"),
        Arc::new(ScriptedProvider::new("ollama")),
    );

    let summary = aggregator(ProviderRegistry::new(vec![disabled, broken, ollama]))
        .check_all()
        .await;

    assert!(summary.is_healthy());
    assert_eq!(summary.providers["anthropic"].status, HEALTH_STATUS_DISABLED);
    let openai = &summary.providers["openai"];
    assert_eq!(openai.status, HEALTH_STATUS_UNAVAILABLE);
    assert_eq!(openai.detail.as_deref(), Some("OpenAI API key is not configured"));
}

#[tokio::test(start_paused = true)]
async fn test_no_providers_is_degraded() {
    let summary = aggregator(ProviderRegistry::new(Vec::new())).check_all().await;

    assert_eq!(summary.status, SystemStatus::Degraded);
    assert!(summary.recommended.is_none());
    assert!(summary.providers.is_empty());
}
