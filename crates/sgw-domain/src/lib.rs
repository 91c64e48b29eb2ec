//! Suggestion Gateway Domain Layer
//!
//! Core types shared by every layer: generation requests and results,
//! provider settings, health reports, the error taxonomy, and the port
//! traits the outer layers implement.
//!
//! This crate has no I/O and no async runtime dependency.

/// Domain constants
pub mod constants;
/// Error types
pub mod error;
/// Port interfaces
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
