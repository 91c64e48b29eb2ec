//! Tests for the provider registry and fallback selector

use std::sync::Arc;

use sgw_application::use_cases::ProviderRegistry;
use sgw_domain::error::Error;
use sgw_domain::value_objects::ProviderSettings;

use crate::test_utils::{ScriptedProvider, broken_handle, hosted, scripted_handle};

fn provider(name: &str) -> Arc<ScriptedProvider> {
    Arc::new(ScriptedProvider::new(name))
}

fn registry_with_local() -> ProviderRegistry {
    let (openai, _) = scripted_handle("openai", hosted("gpt-4o-mini"), provider("openai"));
    let (anthropic, _) = scripted_handle(
        "anthropic",
        ProviderSettings {
            priority: 50,
            ..hosted("claude-3-5-haiku-latest")
        },
        provider("anthropic"),
    );
    let (ollama, _) = scripted_handle(
        "ollama",
        ProviderSettings {
            priority: 500,
            ..ProviderSettings::self_hosted("llama3.1")
        },
        provider("ollama"),
    );
    ProviderRegistry::new(vec![openai, anthropic, ollama])
}

#[test]
fn test_handles_ordered_by_priority_then_name() {
    let (b, _) = scripted_handle("b", hosted("m"), provider("b"));
    let (a, _) = scripted_handle("a", hosted("m"), provider("a"));
    let (first, _) = scripted_handle(
        "z",
        ProviderSettings {
            priority: 1,
            ..hosted("m")
        },
        provider("z"),
    );
    let registry = ProviderRegistry::new(vec![b, a, first]);

    let names: Vec<_> = registry.handles().iter().map(|h| h.name().to_string()).collect();
    assert_eq!(names, vec!["z", "a", "b"]);
}

#[test]
fn test_recommended_prefers_self_hosted() {
    let registry = registry_with_local();
    assert_eq!(registry.recommended().unwrap().name(), "ollama");
}

#[test]
fn test_recommended_without_self_hosted_uses_priority() {
    let (openai, _) = scripted_handle("openai", hosted("gpt-4o-mini"), provider("openai"));
    let (anthropic, _) = scripted_handle(
        "anthropic",
        ProviderSettings {
            priority: 50,
            ..hosted("claude-3-5-haiku-latest")
        },
        provider("anthropic"),
    );
    let registry = ProviderRegistry::new(vec![openai, anthropic]);

    assert_eq!(registry.recommended().unwrap().name(), "anthropic");
}

#[test]
fn test_resolve_uses_requested_provider() {
    let registry = registry_with_local();
    assert_eq!(registry.resolve(Some("openai")).unwrap().name(), "openai");
}

#[test]
fn test_resolve_without_name_uses_recommended() {
    let registry = registry_with_local();
    assert_eq!(registry.resolve(None).unwrap().name(), "ollama");
    assert_eq!(registry.resolve(Some("  ")).unwrap().name(), "ollama");
}

#[test]
fn test_resolve_unknown_provider_falls_back() {
    let registry = registry_with_local();
    assert_eq!(registry.resolve(Some("mistral")).unwrap().name(), "ollama");
}

#[test]
fn test_resolve_disabled_provider_falls_back() {
    let (openai, _) = scripted_handle(
        "openai",
        ProviderSettings {
            enabled: false,
            ..hosted("gpt-4o-mini")
        },
        provider("openai"),
    );
    let (anthropic, _) = scripted_handle("anthropic", hosted("claude"), provider("anthropic"));
    let registry = ProviderRegistry::new(vec![openai, anthropic]);

    assert_eq!(registry.resolve(Some("openai")).unwrap().name(), "anthropic");
}

#[test]
fn test_hosted_provider_without_credentials_is_disabled() {
    let (openai, _) = scripted_handle(
        "openai",
        ProviderSettings::hosted("gpt-4o-mini"),
        provider("openai"),
    );
    assert!(!openai.is_enabled());
    assert!(!openai.descriptor().is_enabled);
    assert!(!openai.refresh_enabled());
}

#[test]
fn test_resolve_skips_provider_whose_adapter_failed() {
    let broken = broken_handle("openai", hosted("gpt-4o-mini"), "client init failed");
    let (anthropic, _) = scripted_handle("anthropic", hosted("claude"), provider("anthropic"));
    let registry = ProviderRegistry::new(vec![broken, anthropic]);

    assert_eq!(registry.resolve(Some("openai")).unwrap().name(), "anthropic");
    let openai = registry.get("openai").unwrap();
    assert!(openai.is_enabled());
    assert!(!openai.is_selectable());
    assert_eq!(openai.init_error(), Some("client init failed"));
}

#[test]
fn test_no_provider_available() {
    let broken = broken_handle("openai", hosted("gpt-4o-mini"), "client init failed");
    let registry = ProviderRegistry::new(vec![broken]);

    let error = registry.resolve(Some("openai")).unwrap_err();
    assert!(matches!(error, Error::NoProviderAvailable { .. }));
    assert!(matches!(
        ProviderRegistry::new(Vec::new()).recommended(),
        Err(Error::NoProviderAvailable { .. })
    ));
}

#[test]
fn test_resolve_model() {
    let settings = ProviderSettings {
        supported_models: vec!["gpt-4o-mini".to_string(), "gpt-4o".to_string()],
        ..hosted("gpt-4o-mini")
    };
    let (handle, _) = scripted_handle("openai", settings, provider("openai"));

    assert_eq!(handle.resolve_model(Some("gpt-4o")), "gpt-4o");
    assert_eq!(handle.resolve_model(Some("gpt-5-ultra")), "gpt-4o-mini");
    assert_eq!(handle.resolve_model(None), "gpt-4o-mini");

    let (open, _) = scripted_handle("local", ProviderSettings::self_hosted("llama3.1"), provider("local"));
    assert_eq!(open.resolve_model(Some("qwen2.5")), "qwen2.5");
}

#[test]
fn test_descriptor_uses_display_name() {
    let settings = ProviderSettings {
        display_name: Some("OpenAI".to_string()),
        ..hosted("gpt-4o-mini")
    };
    let (handle, _) = scripted_handle("openai", settings, provider("openai"));

    let descriptor = handle.descriptor();
    assert_eq!(descriptor.display_name, "OpenAI");
    assert_eq!(descriptor.default_model, "gpt-4o-mini");
    assert!(descriptor.is_enabled);
    assert!(!descriptor.self_hosted);
}
