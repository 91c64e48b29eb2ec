//! Composition root
//!
//! Builds the gateway and its collaborators from configuration. Adapters
//! come from the linkme registry populated by `sgw-providers`; each provider
//! gets its own breaker and limiter.
//!
//! ```text
//! AppConfig → TextGenerationProviderConfig → linkme registry → adapter
//!          └→ breaker + limiter ─────────────────────────────→ ProviderHandle
//!                                    ProviderRegistry → RetryingClient / HealthAggregator
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?)?;
//! let result = context.gateway().generate(request).await;
//! ```

use std::sync::Arc;

use sgw_application::domain_services::{OutputSanitizer, PriceTable, UsageMeter};
use sgw_application::ports::registry::{
    TextGenerationProviderConfig, resolve_text_generation_provider,
};
use sgw_application::use_cases::{
    HealthAggregator, ProviderHandle, ProviderRegistry, RetryingClient, SuggestionGateway,
};
use sgw_domain::error::Result;
use sgw_domain::ports::infrastructure::UsageRecorder;
use sgw_domain::value_objects::ProviderSettings;
use tracing::{info, warn};

use crate::config::{AppConfig, RateLimiterConfig};
use crate::config::loader::validate_app_config;
use crate::resilience::{
    CircuitBreakerConfig, InMemoryCircuitBreaker, InMemoryRateLimiter, RateLimiterSettings,
};
use crate::usage::UsageLedger;

/// Application context: the gateway plus the services it was built from
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    registry: Arc<ProviderRegistry>,
    ledger: Arc<UsageLedger>,
    gateway: Arc<SuggestionGateway>,
}

impl AppContext {
    /// Suggestion gateway
    pub fn gateway(&self) -> Arc<SuggestionGateway> {
        Arc::clone(&self.gateway)
    }

    /// Provider registry
    pub fn registry(&self) -> Arc<ProviderRegistry> {
        Arc::clone(&self.registry)
    }

    /// Usage ledger
    pub fn ledger(&self) -> Arc<UsageLedger> {
        Arc::clone(&self.ledger)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Build the application context
///
/// A provider whose adapter fails to initialize stays listed (and shows in
/// health) but is never selected; only invalid configuration fails here.
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    validate_app_config(&config)?;
    info!(providers = config.providers.len(), "Initializing suggestion gateway");

    let config = Arc::new(config);
    let registry = Arc::new(build_registry(&config));

    let mut prices = PriceTable::with_defaults();
    prices.extend(config.pricing.iter().map(|(model, price)| (model.clone(), *price)));

    let ledger = Arc::new(UsageLedger::new());
    let recorder: Arc<dyn UsageRecorder> = ledger.clone();

    let client = RetryingClient::new(
        Arc::clone(&registry),
        OutputSanitizer::new(config.sanitizer.fallback_text.clone()),
        UsageMeter::new(prices),
        Arc::clone(&recorder),
    );
    let health = HealthAggregator::new(Arc::clone(&registry), config.health.probe_timeout());
    let gateway = Arc::new(SuggestionGateway::new(
        Arc::clone(&registry),
        client,
        health,
        recorder,
    ));

    match registry.recommended() {
        Ok(handle) => info!(recommended = handle.name(), "Suggestion gateway ready"),
        Err(error) => warn!(error = %error, "Suggestion gateway started without a usable provider"),
    }

    Ok(AppContext {
        config,
        registry,
        ledger,
        gateway,
    })
}

/// Build the provider registry from configuration
pub fn build_registry(config: &AppConfig) -> ProviderRegistry {
    let handles = config
        .providers
        .iter()
        .map(|(name, settings)| build_handle(name, settings, &config.rate_limiter))
        .collect();
    ProviderRegistry::new(handles)
}

/// Build one provider handle with its own breaker and limiter
pub fn build_handle(
    name: &str,
    settings: &ProviderSettings,
    bounds: &RateLimiterConfig,
) -> ProviderHandle {
    let adapter = if settings.enabled {
        let adapter_config = TextGenerationProviderConfig::from_settings(name, settings);
        resolve_text_generation_provider(&adapter_config)
    } else {
        Err("provider is disabled by configuration".to_string())
    };

    match &adapter {
        Ok(_) => info!(
            provider = name,
            adapter = settings.adapter_name(name),
            model = %settings.default_model,
            "Provider adapter initialized"
        ),
        Err(reason) if settings.enabled => warn!(
            provider = name,
            adapter = settings.adapter_name(name),
            reason = %reason,
            "Provider adapter failed to initialize"
        ),
        Err(_) => info!(provider = name, "Provider disabled by configuration"),
    }

    let breaker = Arc::new(InMemoryCircuitBreaker::new(
        CircuitBreakerConfig::from_settings(name, settings),
    ));
    let limiter = Arc::new(InMemoryRateLimiter::new(RateLimiterSettings::per_minute(
        name,
        settings.rate_limit_per_minute,
        bounds,
    )));

    ProviderHandle::new(name, settings.clone(), adapter, breaker, limiter)
}
