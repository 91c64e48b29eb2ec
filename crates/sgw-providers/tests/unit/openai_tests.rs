//! Tests for the OpenAI adapter

use std::time::Duration;

use mockito::{Matcher, Server};
use reqwest::Client;
use serde_json::json;
use sgw_domain::error::Error;
use sgw_domain::ports::providers::{PromptFormat, TextGenerationProvider};
use sgw_providers::text_generation::OpenAITextGenerationProvider;

use crate::common::chat_call;

fn provider(base_url: String) -> OpenAITextGenerationProvider {
    OpenAITextGenerationProvider::new(
        "openai".to_string(),
        "sk-test".to_string(),
        Some(base_url),
        "gpt-4o-mini".to_string(),
        Duration::from_secs(5),
        Client::new(),
    )
}

#[test]
fn test_openai_defaults() {
    let provider = OpenAITextGenerationProvider::new(
        "primary".to_string(),
        "sk-test".to_string(),
        None,
        "gpt-4o-mini".to_string(),
        Duration::from_secs(5),
        Client::new(),
    );
    assert_eq!(provider.provider_name(), "primary");
    assert_eq!(provider.base_url(), "https://api.openai.com/v1");
    assert_eq!(provider.model(), "gpt-4o-mini");
    assert_eq!(provider.prompt_format(), PromptFormat::Messages);
    assert_eq!(provider.stats()["adapter"], "openai");
}

#[tokio::test]
async fn test_openai_generate_sends_chat_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 120,
            "stream": false,
            "messages": [
                {"role": "system", "content": "Reply in English."},
                {"role": "user", "content": "Do you ship to Lisbon?"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "model": "gpt-4o-mini-2024-07-18",
                "choices": [{"message": {"role": "assistant", "content": "Yes, we do."}}],
                "usage": {"prompt_tokens": 21, "completion_tokens": 4}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = provider(server.url())
        .generate(&chat_call("gpt-4o-mini"))
        .await
        .expect("generate should succeed");

    assert_eq!(response.text.as_deref(), Some("Yes, we do."));
    assert_eq!(response.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
    assert_eq!(response.usage.input_tokens, Some(21));
    assert_eq!(response.usage.output_tokens, Some(4));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_stop_sequences_are_forwarded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({"stop": ["\nCustomer:"]})))
        .with_status(200)
        .with_body(json!({"choices": [{"message": {"content": "ok"}}]}).to_string())
        .create_async()
        .await;

    let mut call = chat_call("gpt-4o-mini");
    call.stop = vec!["\nCustomer:".to_string()];
    let response = provider(server.url()).generate(&call).await.expect("generate");

    assert_eq!(response.text.as_deref(), Some("ok"));
    assert_eq!(response.usage.input_tokens, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_missing_choices_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(json!({"id": "x"}).to_string())
        .create_async()
        .await;

    let error = provider(server.url())
        .generate(&chat_call("gpt-4o-mini"))
        .await
        .expect_err("missing choices must fail");
    assert!(matches!(error, Error::InvalidResponse { .. }));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_openai_status_mapping() {
    let cases = [
        (401, "unavailable", false),
        (429, "provider", true),
        (503, "provider", true),
        (400, "provider", false),
    ];

    for (status, expected, retryable) in cases {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(status)
            .with_body("{\"error\": \"nope\"}")
            .create_async()
            .await;

        let error = provider(server.url())
            .generate(&chat_call("gpt-4o-mini"))
            .await
            .expect_err("non-2xx must fail");

        match expected {
            "unavailable" => assert!(
                matches!(error, Error::ProviderUnavailable { .. }),
                "status {status}: {error}"
            ),
            _ => assert!(matches!(error, Error::Provider { .. }), "status {status}: {error}"),
        }
        assert_eq!(error.is_retryable(), retryable, "status {status}");
        assert!(error.to_string().contains(&status.to_string()));
    }
}

#[tokio::test]
async fn test_openai_health_counts_models() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/models")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_body(json!({"data": [{"id": "gpt-4o-mini"}, {"id": "gpt-4o"}]}).to_string())
        .create_async()
        .await;

    let probe = provider(server.url()).check_health().await.expect("health");
    assert_eq!(probe.detail.as_deref(), Some("2 models available"));
}

#[tokio::test]
async fn test_openai_unreachable_is_retryable_network_error() {
    let error = provider("http://127.0.0.1:1".to_string())
        .generate(&chat_call("gpt-4o-mini"))
        .await
        .expect_err("nothing listens on port 1");
    assert!(matches!(error, Error::Network { .. }));
    assert!(error.is_retryable());
}
