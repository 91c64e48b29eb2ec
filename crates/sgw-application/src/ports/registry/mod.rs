//! Provider Registry System
//!
//! Compile-time registration of text generation adapters with the `linkme`
//! crate. Adapters are discovered at startup and instantiated for every
//! configured provider that names them.
//!
//! ```text
//! 1. Adapter defines:   #[linkme::distributed_slice(TEXT_GENERATION_PROVIDERS)]
//!                       static ENTRY: TextGenerationProviderEntry = ...
//! 2. Registry declares: #[linkme::distributed_slice]
//!                       pub static TEXT_GENERATION_PROVIDERS: [Entry] = [..]
//! 3. Bootstrap queries: resolve_text_generation_provider(&config)
//! 4. Config selects:    [providers.local] adapter = "ollama"
//! ```
//!
//! ### Registering an adapter (in sgw-providers)
//!
//! ```ignore
//! use sgw_application::ports::registry::{TextGenerationProviderEntry, TEXT_GENERATION_PROVIDERS};
//!
//! #[linkme::distributed_slice(TEXT_GENERATION_PROVIDERS)]
//! static OLLAMA_PROVIDER: TextGenerationProviderEntry = TextGenerationProviderEntry {
//!     name: "ollama",
//!     description: "Ollama self-hosted text generation",
//!     factory: ollama_factory,
//! };
//! ```

pub mod text_generation;

pub use text_generation::{
    TEXT_GENERATION_PROVIDERS, TextGenerationProviderConfig, TextGenerationProviderEntry,
    is_text_generation_provider_registered, list_text_generation_providers,
    resolve_text_generation_provider,
};
