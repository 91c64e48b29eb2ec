//! Provider-specific constants

// ============================================================================
// OPENAI
// ============================================================================

/// OpenAI API base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when none is configured
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

// ============================================================================
// ANTHROPIC
// ============================================================================

/// Anthropic API base URL
pub const ANTHROPIC_DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Model used when none is configured
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

/// Value of the `anthropic-version` header
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// User message sent when a conversation has no turns (the API requires one)
pub const ANTHROPIC_EMPTY_CONVERSATION_MESSAGE: &str = "(the customer has not written yet)";

// ============================================================================
// OLLAMA
// ============================================================================

/// Default Ollama server port
pub const OLLAMA_DEFAULT_PORT: u16 = 11434;

/// Ollama server URL used when none is configured
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Model used when none is configured
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3.1";

// ============================================================================
// HTTP
// ============================================================================

/// Content-Type header value for JSON requests
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Default request timeout in seconds
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum idle connections per host
pub const HTTP_MAX_IDLE_PER_HOST: usize = 10;

/// Idle connection timeout in seconds
pub const HTTP_CLIENT_IDLE_TIMEOUT_SECS: u64 = 90;

/// TCP keep-alive in seconds
pub const HTTP_KEEPALIVE_SECS: u64 = 60;

/// Characters of an error body kept in error messages
pub const ERROR_BODY_MAX_CHARS: usize = 300;
