//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `sgw_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "sgw.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "sgw";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SGW";

/// Separator for nested keys in environment variables (`SGW_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "SGW_LOG";

/// Log file name stem when the configured path has none
pub const LOG_FILE_STEM: &str = "sgw";

// ============================================================================
// RATE LIMITER CONSTANTS
// ============================================================================

/// Idle time after which a conversation window is evicted (2 × window)
pub const RATE_LIMITER_KEY_TTL_SECS: u64 = 120;

/// Maximum conversation windows tracked per provider
pub const RATE_LIMITER_MAX_KEYS: u64 = 100_000;

// ============================================================================
// HEALTH CONSTANTS
// ============================================================================

/// Timeout for one provider health probe (milliseconds)
pub const HEALTH_PROBE_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// PROVIDER DEFAULTS
// ============================================================================

/// Environment variable read for the OpenAI API key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable read for the Anthropic API key
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
