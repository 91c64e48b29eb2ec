//! Application Layer - Suggestion Gateway
//!
//! Orchestrates calls to interchangeable text-generation providers:
//! selection with fallback, circuit breaking and rate limiting through the
//! domain ports, bounded retries, guard-railed prompts, output sanitization,
//! usage metering and health aggregation.
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `sgw-domain`: value objects, errors and port traits
//! - Pure Rust libraries for async, serialization, regex, etc.
//!
//! Concrete breakers, limiters and adapters are injected by
//! `sgw-infrastructure` and registered by `sgw-providers`.

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use use_cases::*;
