//! Domain Services
//!
//! Pure, synchronous building blocks used by the retrying client.
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`GuardrailedPromptBuilder`] | Conversation + policy to provider input |
//! | [`OutputSanitizer`] | Raw provider text to a safe suggestion |
//! | [`UsageMeter`] | Token and cost accounting |

/// Prompt construction
pub mod prompt;
/// Output sanitization
pub mod sanitizer;
/// Usage metering
pub mod usage;

pub use prompt::GuardrailedPromptBuilder;
pub use sanitizer::{OutputSanitizer, SanitizedOutput};
pub use usage::{PriceTable, UsageMeter, estimate_tokens};
