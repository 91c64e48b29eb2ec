//! Configuration types module

pub mod app;
pub mod logging;
pub mod runtime;

// Re-export main types
pub use app::*;
pub use logging::LoggingConfig;
pub use runtime::{HealthConfig, RateLimiterConfig, SanitizerConfig};
