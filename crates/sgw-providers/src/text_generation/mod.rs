//! Text Generation Provider Implementations
//!
//! Vendor adapters behind the `TextGenerationProvider` port. Each adapter
//! performs exactly one outbound call per `generate`; retries, breakers and
//! rate limits live in the application layer.
//!
//! ## Available Providers
//!
//! | Provider | Type | Prompt format |
//! |----------|------|---------------|
//! | NullTextGenerationProvider | Testing | Flat |
//! | OllamaTextGenerationProvider | Self-hosted | Flat |
//! | OpenAITextGenerationProvider | Cloud | Messages |
//! | AnthropicTextGenerationProvider | Cloud | Messages |

#[cfg(feature = "generation-anthropic")]
pub mod anthropic;
pub mod helpers;
pub mod null;
#[cfg(feature = "generation-ollama")]
pub mod ollama;
#[cfg(feature = "generation-openai")]
pub mod openai;

// Re-export for convenience
#[cfg(feature = "generation-anthropic")]
pub use anthropic::AnthropicTextGenerationProvider;
pub use helpers::constructor;
pub use null::NullTextGenerationProvider;
#[cfg(feature = "generation-ollama")]
pub use ollama::OllamaTextGenerationProvider;
#[cfg(feature = "generation-openai")]
pub use openai::OpenAITextGenerationProvider;
