//! Generation Value Objects
//!
//! Requests handed to the gateway and the discriminated results it returns.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_CONTEXT_TURNS, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Who authored a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The end customer the suggestion answers
    Customer,
    /// The business side (human agent or previous suggestion)
    Agent,
}

impl TurnRole {
    /// Label used in flat prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Agent => "Agent",
        }
    }
}

/// A single message of the conversation the suggestion is produced for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Author of the turn
    pub role: TurnRole,
    /// Message text
    pub text: String,
}

impl ConversationTurn {
    /// Turn written by the customer
    pub fn customer(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Customer,
            text: text.into(),
        }
    }

    /// Turn written by the business side
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Agent,
            text: text.into(),
        }
    }
}

/// Tone and language constraints embedded in every prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptPolicy {
    /// Desired tone (e.g. "friendly and professional")
    pub tone: String,
    /// Language the reply must be written in
    pub language: String,
    /// Business the agent speaks for, if known
    pub business_name: Option<String>,
    /// Additional workspace-specific rules
    pub extra_rules: Vec<String>,
    /// Most recent turns kept in the prompt
    pub max_context_turns: usize,
}

impl Default for PromptPolicy {
    fn default() -> Self {
        Self {
            tone: "friendly and professional".to_string(),
            language: "the same language the customer used".to_string(),
            business_name: None,
            extra_rules: Vec::new(),
            max_context_turns: DEFAULT_MAX_CONTEXT_TURNS,
        }
    }
}

/// Request for one response suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Requested provider; the selector falls back when absent or unusable
    pub provider_name: Option<String>,
    /// Requested model; the provider default is used when absent or unsupported
    pub model: Option<String>,
    /// Latest inbound message the suggestion answers
    pub prompt: String,
    /// Earlier conversation turns, oldest first
    #[serde(default)]
    pub context: Vec<ConversationTurn>,
    /// Tone/language policy
    #[serde(default)]
    pub policy: PromptPolicy,
    /// Sampling temperature; clamped to [0, 1]
    pub temperature: f64,
    /// Output token budget; clamped to the provider ceiling
    pub max_tokens: u32,
    /// Workspace the conversation belongs to
    pub workspace_id: String,
    /// Conversation identifier, used as the rate limit key
    pub conversation_id: String,
    /// Caller deadline covering every attempt and backoff sleep
    pub max_latency_ms: Option<u64>,
}

impl GenerationRequest {
    /// Create a request with default sampling settings
    pub fn new(conversation_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            provider_name: None,
            model: None,
            prompt: prompt.into(),
            context: Vec::new(),
            policy: PromptPolicy::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            workspace_id: String::new(),
            conversation_id: conversation_id.into(),
            max_latency_ms: None,
        }
    }

    /// Request a specific provider
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider_name = Some(provider.into());
        self
    }

    /// Request a specific model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the workspace
    pub fn with_workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = workspace_id.into();
        self
    }

    /// Set earlier conversation turns
    pub fn with_context(mut self, context: Vec<ConversationTurn>) -> Self {
        self.context = context;
        self
    }

    /// Set the prompt policy
    pub fn with_policy(mut self, policy: PromptPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the output token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the caller deadline
    pub fn with_max_latency_ms(mut self, max_latency_ms: u64) -> Self {
        self.max_latency_ms = Some(max_latency_ms);
        self
    }

    /// Context turns followed by the latest inbound message
    pub fn conversation(&self) -> Vec<ConversationTurn> {
        let mut turns = self.context.clone();
        if !self.prompt.trim().is_empty() {
            turns.push(ConversationTurn::customer(self.prompt.clone()));
        }
        turns
    }
}

/// Token, latency and cost accounting for one `generate` call
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Input tokens (reported or estimated)
    pub tokens_in: u64,
    /// Output tokens (reported or estimated)
    pub tokens_out: u64,
    /// Caller-observed latency including backoff sleeps
    pub latency_ms: u64,
    /// Cost in USD; absent for self-hosted or unpriced models
    pub cost_usd: Option<f64>,
}

impl Usage {
    /// Usage of a call that never reached a provider
    pub fn zero(latency_ms: u64) -> Self {
        Self {
            latency_ms,
            cost_usd: Some(0.0),
            ..Default::default()
        }
    }
}

/// Failure taxonomy of `generate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Breaker open; fast-failed without I/O
    CircuitBreakerOpen,
    /// Conversation exceeded its per-minute budget
    RateLimitExceeded,
    /// Missing credentials or client init failure
    ProviderUnavailable,
    /// Network/HTTP failure after exhausting retries
    ProviderError,
    /// Malformed payload from the provider
    InvalidResponse,
    /// Caller deadline exceeded
    Timeout,
    /// Selector found no enabled provider
    NoProviderAvailable,
}

impl ErrorKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CircuitBreakerOpen => "CIRCUIT_BREAKER_OPEN",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::ProviderUnavailable => "PROVIDER_UNAVAILABLE",
            Self::ProviderError => "PROVIDER_ERROR",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::Timeout => "TIMEOUT",
            Self::NoProviderAvailable => "NO_PROVIDER_AVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one `generate` call
///
/// Every outcome, including failures, is returned as a value so one provider's
/// failure never aborts the caller's request path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Whether `text` holds a usable suggestion
    pub ok: bool,
    /// Provider that handled (or rejected) the call
    pub provider: Option<String>,
    /// Model used for the call
    pub model: Option<String>,
    /// Sanitized suggestion text
    pub text: Option<String>,
    /// JSON object embedded in the output, if one parsed
    pub structured_payload: Option<serde_json::Value>,
    /// Usage accounting
    pub usage: Usage,
    /// Failure kind when `ok` is false
    pub error_kind: Option<ErrorKind>,
    /// Failure detail when `ok` is false
    pub error_message: Option<String>,
}

impl GenerationResult {
    /// Successful result
    pub fn success(
        text: String,
        structured_payload: Option<serde_json::Value>,
        usage: Usage,
    ) -> Self {
        Self {
            ok: true,
            provider: None,
            model: None,
            text: Some(text),
            structured_payload,
            usage,
            error_kind: None,
            error_message: None,
        }
    }

    /// Failed result
    pub fn failure(kind: ErrorKind, message: impl Into<String>, usage: Usage) -> Self {
        Self {
            ok: false,
            provider: None,
            model: None,
            text: None,
            structured_payload: None,
            usage,
            error_kind: Some(kind),
            error_message: Some(message.into()),
        }
    }

    /// Attach the provider and model that handled the call
    pub fn with_provider(mut self, provider: impl Into<String>, model: Option<String>) -> Self {
        self.provider = Some(provider.into());
        self.model = model;
        self
    }
}
