//! Configuration
//!
//! Typed application configuration and its layered loader.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
