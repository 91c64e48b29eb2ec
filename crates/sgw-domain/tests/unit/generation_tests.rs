//! Unit tests for generation value objects

use sgw_domain::{
    ConversationTurn, ErrorKind, GenerationRequest, GenerationResult, TurnRole, Usage,
};

#[test]
fn test_request_defaults() {
    let request = GenerationRequest::new("conv-1", "Do you ship to Lisbon?");

    assert_eq!(request.conversation_id, "conv-1");
    assert!(request.provider_name.is_none());
    assert!(request.model.is_none());
    assert!(request.max_latency_ms.is_none());
    assert!((request.temperature - 0.7).abs() < f64::EPSILON);
    assert_eq!(request.max_tokens, 256);
}

#[test]
fn test_conversation_appends_prompt_as_customer_turn() {
    let request = GenerationRequest::new("conv-1", "And the price?").with_context(vec![
        ConversationTurn::customer("Hi, do you have size M?"),
        ConversationTurn::agent("Yes, we do!"),
    ]);

    let turns = request.conversation();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[2].role, TurnRole::Customer);
    assert_eq!(turns[2].text, "And the price?");
}

#[test]
fn test_conversation_skips_blank_prompt() {
    let request = GenerationRequest::new("conv-1", "   ")
        .with_context(vec![ConversationTurn::customer("Hello")]);

    assert_eq!(request.conversation().len(), 1);
}

#[test]
fn test_request_deserializes_without_optional_sections() {
    let request: GenerationRequest = serde_json::from_value(serde_json::json!({
        "provider_name": null,
        "model": null,
        "prompt": "hello",
        "temperature": 0.2,
        "max_tokens": 64,
        "workspace_id": "ws",
        "conversation_id": "c",
        "max_latency_ms": null
    }))
    .expect("request should deserialize");

    assert!(request.context.is_empty());
    assert_eq!(request.policy.max_context_turns, 20);
}

#[test]
fn test_error_kind_wire_names() {
    assert_eq!(ErrorKind::CircuitBreakerOpen.as_str(), "CIRCUIT_BREAKER_OPEN");
    assert_eq!(
        serde_json::to_value(ErrorKind::RateLimitExceeded).expect("serialize"),
        serde_json::json!("RATE_LIMIT_EXCEEDED")
    );
    assert_eq!(ErrorKind::NoProviderAvailable.to_string(), "NO_PROVIDER_AVAILABLE");
}

#[test]
fn test_failure_result_shape() {
    let result = GenerationResult::failure(
        ErrorKind::CircuitBreakerOpen,
        "circuit open for openai",
        Usage::zero(0),
    )
    .with_provider("openai", Some("gpt-4o-mini".to_string()));

    assert!(!result.ok);
    assert!(result.text.is_none());
    assert_eq!(result.error_kind, Some(ErrorKind::CircuitBreakerOpen));
    assert_eq!(result.provider.as_deref(), Some("openai"));
    assert_eq!(result.usage.tokens_in, 0);
    assert_eq!(result.usage.cost_usd, Some(0.0));
}

#[test]
fn test_success_result_shape() {
    let result = GenerationResult::success("Sure!".to_string(), None, Usage::default());

    assert!(result.ok);
    assert_eq!(result.text.as_deref(), Some("Sure!"));
    assert!(result.error_kind.is_none());
    assert!(result.error_message.is_none());
}
