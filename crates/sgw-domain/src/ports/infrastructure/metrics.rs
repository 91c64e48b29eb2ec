//! Usage Recorder Port
//!
//! Defines the contract for accumulating per-provider usage so spend can be
//! monitored.

use serde::{Deserialize, Serialize};

use crate::value_objects::GenerationResult;

/// Accumulated usage of one provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageTotals {
    /// Calls recorded
    pub requests: u64,
    /// Calls that returned a suggestion
    pub successes: u64,
    /// Calls that failed
    pub failures: u64,
    /// Input tokens
    pub tokens_in: u64,
    /// Output tokens
    pub tokens_out: u64,
    /// Cost in USD over priced calls
    pub cost_usd: f64,
    /// Sum of caller-observed latency (milliseconds)
    pub total_latency_ms: u64,
}

impl UsageTotals {
    /// Mean latency per recorded call
    pub fn average_latency_ms(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.requests as f64
        }
    }
}

/// Usage recorder interface
pub trait UsageRecorder: Send + Sync {
    /// Record the outcome of one `generate` call
    fn record(&self, provider: &str, result: &GenerationResult);

    /// Totals for one provider
    fn totals(&self, provider: &str) -> Option<UsageTotals>;
}
