//! Text Generation Provider Port
//!
//! The capability every vendor adapter implements: one outbound generation
//! call, a lightweight health probe, and adapter-level stats.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Input shape an adapter expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptFormat {
    /// One guard-railed prompt string (completion endpoints)
    Flat,
    /// Structured chat messages (chat endpoints)
    Messages,
}

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions for the model
    System,
    /// Customer-side message
    User,
    /// Business-side message
    Assistant,
}

impl ChatRole {
    /// Wire name used by chat APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One structured chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: ChatRole,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a message
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Fully prepared outbound call
///
/// Temperature and token budget are already clamped to the provider's limits
/// when an adapter receives this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCall {
    /// Model to call
    pub model: String,
    /// Flat prompt, set for `PromptFormat::Flat` adapters
    pub prompt: Option<String>,
    /// Chat messages, set for `PromptFormat::Messages` adapters
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature in [0, 1]
    pub temperature: f64,
    /// Output token budget
    pub max_tokens: u32,
    /// Stop sequences
    pub stop: Vec<String>,
}

impl ProviderCall {
    /// Text sent to the provider, used to estimate input tokens
    pub fn input_text(&self) -> String {
        match &self.prompt {
            Some(prompt) => prompt.clone(),
            None => self
                .messages
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Token usage as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Reported input tokens
    pub input_tokens: Option<u64>,
    /// Reported output tokens
    pub output_tokens: Option<u64>,
}

/// Raw provider answer before sanitization
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Generated text, if any
    pub text: Option<String>,
    /// Model the provider reports having used
    pub model: Option<String>,
    /// Reported usage
    pub usage: TokenUsage,
}

/// Successful health probe
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthProbe {
    /// Optional detail (e.g. number of models served)
    pub detail: Option<String>,
}

/// Text generation provider interface
///
/// # Example
///
/// ```ignore
/// let response = provider.generate(&call).await?;
/// let probe = provider.check_health().await?;
/// println!("{}: {:?}", provider.provider_name(), probe.detail);
/// ```
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Registered adapter name (e.g. "openai", "ollama")
    fn provider_name(&self) -> &str;

    /// Input shape this adapter expects
    fn prompt_format(&self) -> PromptFormat;

    /// Perform one outbound generation call (no retries)
    async fn generate(&self, call: &ProviderCall) -> Result<ProviderResponse>;

    /// Lightweight reachability probe
    async fn check_health(&self) -> Result<HealthProbe>;

    /// Adapter-level stats (endpoint, model, ...) for monitoring
    fn stats(&self) -> serde_json::Value;
}
