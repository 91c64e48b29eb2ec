//! Shared fixtures for adapter tests

use sgw_domain::ports::providers::{ChatMessage, ChatRole, ProviderCall};

/// Chat-style call with a system message and one customer turn
pub fn chat_call(model: &str) -> ProviderCall {
    ProviderCall {
        model: model.to_string(),
        prompt: None,
        messages: vec![
            ChatMessage::new(ChatRole::System, "Reply in English."),
            ChatMessage::new(ChatRole::User, "Do you ship to Lisbon?"),
        ],
        temperature: 0.4,
        max_tokens: 120,
        stop: Vec::new(),
    }
}

/// Flat-prompt call
pub fn flat_call(model: &str) -> ProviderCall {
    ProviderCall {
        model: model.to_string(),
        prompt: Some("Rules\n\nConversation:\nCustomer: Do you ship to Lisbon?\n\nAgent:".to_string()),
        messages: Vec::new(),
        temperature: 0.4,
        max_tokens: 120,
        stop: Vec::new(),
    }
}
