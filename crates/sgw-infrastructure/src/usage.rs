//! Usage ledger
//!
//! Process-local per-provider usage totals behind the `UsageRecorder` port.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sgw_domain::ports::infrastructure::{UsageRecorder, UsageTotals};
use sgw_domain::value_objects::GenerationResult;
use tracing::{debug, info};

/// Ledger entry for one provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Aggregated totals
    pub totals: UsageTotals,
    /// Failures keyed by error kind
    pub failures_by_kind: BTreeMap<String, u64>,
    /// When the provider was last recorded
    pub last_used: Option<DateTime<Utc>>,
}

impl LedgerEntry {
    fn apply(&mut self, result: &GenerationResult) {
        let totals = &mut self.totals;
        totals.requests += 1;
        totals.tokens_in += result.usage.tokens_in;
        totals.tokens_out += result.usage.tokens_out;
        totals.total_latency_ms += result.usage.latency_ms;
        totals.cost_usd += result.usage.cost_usd.unwrap_or(0.0);

        if result.ok {
            totals.successes += 1;
        } else {
            totals.failures += 1;
            if let Some(kind) = result.error_kind {
                *self
                    .failures_by_kind
                    .entry(kind.as_str().to_string())
                    .or_insert(0) += 1;
            }
        }
        self.last_used = Some(Utc::now());
    }
}

/// Per-provider usage ledger
#[derive(Debug, Default)]
pub struct UsageLedger {
    entries: DashMap<String, LedgerEntry>,
}

impl UsageLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Full entry for one provider
    pub fn entry(&self, provider: &str) -> Option<LedgerEntry> {
        self.entries.get(provider).map(|entry| entry.clone())
    }

    /// Entries for every recorded provider, by name
    pub fn entries(&self) -> BTreeMap<String, LedgerEntry> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Totals across every provider
    pub fn grand_total(&self) -> UsageTotals {
        self.entries
            .iter()
            .fold(UsageTotals::default(), |mut acc, entry| {
                let totals = &entry.totals;
                acc.requests += totals.requests;
                acc.successes += totals.successes;
                acc.failures += totals.failures;
                acc.tokens_in += totals.tokens_in;
                acc.tokens_out += totals.tokens_out;
                acc.cost_usd += totals.cost_usd;
                acc.total_latency_ms += totals.total_latency_ms;
                acc
            })
    }
}

impl UsageRecorder for UsageLedger {
    fn record(&self, provider: &str, result: &GenerationResult) {
        self.entries
            .entry(provider.to_string())
            .or_default()
            .apply(result);

        if result.ok {
            info!(
                provider,
                tokens_in = result.usage.tokens_in,
                tokens_out = result.usage.tokens_out,
                latency_ms = result.usage.latency_ms,
                cost_usd = result.usage.cost_usd,
                "Usage recorded"
            );
        } else {
            debug!(
                provider,
                error_kind = ?result.error_kind,
                latency_ms = result.usage.latency_ms,
                "Failed generation recorded"
            );
        }
    }

    fn totals(&self, provider: &str) -> Option<UsageTotals> {
        self.entries.get(provider).map(|entry| entry.totals.clone())
    }
}

/// Recorder that drops every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUsageRecorder;

impl UsageRecorder for NullUsageRecorder {
    fn record(&self, _provider: &str, _result: &GenerationResult) {}

    fn totals(&self, _provider: &str) -> Option<UsageTotals> {
        None
    }
}
