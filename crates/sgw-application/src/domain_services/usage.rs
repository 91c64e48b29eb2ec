//! Usage metering
//!
//! Token accounting and cost estimation for a single `generate` call.

use std::collections::HashMap;

use sgw_domain::constants::CHARS_PER_TOKEN;
use sgw_domain::ports::providers::{ProviderCall, ProviderResponse};
use sgw_domain::value_objects::{ModelPrice, Usage};

/// Built-in prices (USD per 1000 tokens) for the hosted models the adapters know
const DEFAULT_PRICES: &[(&str, ModelPrice)] = &[
    ("gpt-4o-mini", ModelPrice::new(0.000_15, 0.000_6)),
    ("gpt-4o", ModelPrice::new(0.002_5, 0.01)),
    ("gpt-4.1-mini", ModelPrice::new(0.000_4, 0.001_6)),
    ("gpt-4.1", ModelPrice::new(0.002, 0.008)),
    ("gpt-3.5-turbo", ModelPrice::new(0.000_5, 0.001_5)),
    ("claude-3-5-haiku-latest", ModelPrice::new(0.000_8, 0.004)),
    ("claude-3-5-sonnet-latest", ModelPrice::new(0.003, 0.015)),
    ("claude-3-haiku-20240307", ModelPrice::new(0.000_25, 0.001_25)),
];

/// Estimate tokens from text length when a provider reports none
pub fn estimate_tokens(text: &str) -> u64 {
    text.chars().count().div_ceil(CHARS_PER_TOKEN) as u64
}

/// Per-model price table
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<String, ModelPrice>,
}

impl PriceTable {
    /// Empty table; every model is unpriced
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the built-in prices
    pub fn with_defaults() -> Self {
        let prices = DEFAULT_PRICES
            .iter()
            .map(|(model, price)| ((*model).to_string(), *price))
            .collect();
        Self { prices }
    }

    /// Add or replace one price
    pub fn with_price(mut self, model: impl Into<String>, price: ModelPrice) -> Self {
        self.prices.insert(model.into(), price);
        self
    }

    /// Add or replace prices from configuration
    pub fn extend<I, S>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (S, ModelPrice)>,
        S: Into<String>,
    {
        for (model, price) in overrides {
            self.prices.insert(model.into(), price);
        }
    }

    /// Price of a model, if known
    pub fn price_for(&self, model: &str) -> Option<ModelPrice> {
        self.prices.get(model).copied()
    }

    /// Number of priced models
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether no model is priced
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Computes usage for completed calls
#[derive(Debug, Clone)]
pub struct UsageMeter {
    prices: PriceTable,
}

impl Default for UsageMeter {
    fn default() -> Self {
        Self::new(PriceTable::with_defaults())
    }
}

impl UsageMeter {
    /// Create a meter over a price table
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }

    /// Usage of a successful call
    ///
    /// Reported token counts win; missing counts are estimated from the text
    /// sent and the raw text received.
    pub fn measure(
        &self,
        call: &ProviderCall,
        response: &ProviderResponse,
        self_hosted: bool,
        latency_ms: u64,
    ) -> Usage {
        let tokens_in = response
            .usage
            .input_tokens
            .unwrap_or_else(|| estimate_tokens(&call.input_text()));
        let tokens_out = response
            .usage
            .output_tokens
            .unwrap_or_else(|| response.text.as_deref().map_or(0, estimate_tokens));

        Usage {
            tokens_in,
            tokens_out,
            latency_ms,
            cost_usd: self.cost(&call.model, tokens_in, tokens_out, self_hosted),
        }
    }

    /// Cost in USD; `None` for self-hosted providers and unpriced models
    pub fn cost(
        &self,
        model: &str,
        tokens_in: u64,
        tokens_out: u64,
        self_hosted: bool,
    ) -> Option<f64> {
        if self_hosted {
            return None;
        }
        self.prices.price_for(model).map(|price| {
            (tokens_in as f64 / 1000.0) * price.input_per_1k
                + (tokens_out as f64 / 1000.0) * price.output_per_1k
        })
    }
}
