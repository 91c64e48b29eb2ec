//! Domain constants
//!
//! Values that are part of the gateway's observable contract. Provider and
//! infrastructure tuning defaults live in their own crates.

// ============================================================================
// RATE LIMITING
// ============================================================================

/// Trailing window used by per-conversation rate limiting (seconds)
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

// ============================================================================
// GENERATION
// ============================================================================

/// Characters per token used when a provider does not report usage
pub const CHARS_PER_TOKEN: usize = 4;

/// Upper bound for a single backoff sleep between retry attempts (milliseconds)
pub const MAX_BACKOFF_MS: u64 = 30_000;

/// Default temperature for requests built with `GenerationRequest::new`
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default token budget for requests built with `GenerationRequest::new`
pub const DEFAULT_MAX_TOKENS: u32 = 256;

/// Safe text returned when a provider produced nothing usable
pub const DEFAULT_FALLBACK_TEXT: &str =
    "Thanks for your message! A member of our team will get back to you shortly.";

/// Number of conversation turns embedded in a prompt by default
pub const DEFAULT_MAX_CONTEXT_TURNS: usize = 20;

// ============================================================================
// HEALTH STATUS CODES
// ============================================================================

/// Probe succeeded
pub const HEALTH_STATUS_OK: &str = "OK";

/// Probe returned an error or timed out
pub const HEALTH_STATUS_CHECK_ERROR: &str = "HEALTH_CHECK_ERROR";

/// Adapter could not be initialized or lacks credentials
pub const HEALTH_STATUS_UNAVAILABLE: &str = "PROVIDER_UNAVAILABLE";

/// Provider disabled by configuration
pub const HEALTH_STATUS_DISABLED: &str = "DISABLED";
