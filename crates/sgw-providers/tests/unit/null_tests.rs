//! Tests for the null adapter and registry wiring

use sgw_application::ports::registry::{
    TextGenerationProviderConfig, is_text_generation_provider_registered,
    resolve_text_generation_provider,
};
use sgw_domain::ports::providers::TextGenerationProvider;
use sgw_providers::text_generation::NullTextGenerationProvider;

use crate::common::{chat_call, flat_call};

#[tokio::test]
async fn test_null_echoes_latest_customer_message() {
    let provider = NullTextGenerationProvider::default();

    let flat = provider.generate(&flat_call("null")).await.expect("generate");
    assert_eq!(
        flat.text.as_deref(),
        Some("Thanks for your message. We received: Do you ship to Lisbon?")
    );

    let chat = provider.generate(&chat_call("null")).await.expect("generate");
    assert_eq!(chat.text, flat.text);
}

#[tokio::test]
async fn test_null_health_always_ok() {
    let probe = NullTextGenerationProvider::default()
        .check_health()
        .await
        .expect("health");
    assert_eq!(probe.detail.as_deref(), Some("offline"));
}

#[test]
fn test_all_adapters_registered() {
    for adapter in ["openai", "anthropic", "ollama", "null"] {
        assert!(
            is_text_generation_provider_registered(adapter),
            "{adapter} should be registered"
        );
    }
}

#[test]
fn test_factories_require_keys_for_hosted_adapters() {
    for adapter in ["openai", "anthropic"] {
        let error = resolve_text_generation_provider(&TextGenerationProviderConfig::new(adapter))
            .err()
            .expect("hosted adapters need a key");
        assert!(error.contains("API key"), "{adapter}: {error}");
    }

    let provider = resolve_text_generation_provider(
        &TextGenerationProviderConfig::new("anthropic").with_api_key("ak-test"),
    )
    .expect("anthropic with key");
    assert_eq!(provider.provider_name(), "anthropic");
}
