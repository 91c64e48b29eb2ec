//! HTTP Client Abstractions
//!
//! Shared client construction for API-based adapters.

pub mod client;

pub use client::HttpClientConfig;
