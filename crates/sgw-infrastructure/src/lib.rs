//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the application and domain
//! layers.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bootstrap`] | Composition root building the gateway from configuration |
//! | [`config`] | Figment-layered TOML/env configuration |
//! | [`constants`] | Infrastructure constants |
//! | [`error_ext`] | Context extensions for foreign errors |
//! | [`logging`] | Structured logging with tracing |
//! | [`resilience`] | In-memory circuit breaker and rate limiter |
//! | [`usage`] | Per-provider usage ledger |

// Adapters register themselves at link time
extern crate sgw_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod resilience;
pub mod usage;

// Re-export commonly used types
pub use bootstrap::{AppContext, init_app};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
