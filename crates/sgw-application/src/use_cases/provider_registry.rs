//! Provider Registry and Selector
//!
//! Holds every configured provider with its adapter and resilience state,
//! and picks the provider a request runs on.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sgw_domain::error::{Error, Result};
use sgw_domain::ports::infrastructure::{CircuitBreaker, RateLimiter};
use sgw_domain::ports::providers::TextGenerationProvider;
use sgw_domain::value_objects::{ProviderDescriptor, ProviderSettings};
use tracing::{info, warn};

/// One configured provider
///
/// Built once at startup. Only the enabled flag changes afterwards.
pub struct ProviderHandle {
    name: String,
    settings: ProviderSettings,
    adapter: Option<Arc<dyn TextGenerationProvider>>,
    init_error: Option<String>,
    breaker: Arc<dyn CircuitBreaker>,
    limiter: Arc<dyn RateLimiter>,
    enabled: AtomicBool,
}

impl ProviderHandle {
    /// Create a handle
    ///
    /// `adapter` is the outcome of adapter construction; an error keeps the
    /// provider listed but never selected.
    pub fn new(
        name: impl Into<String>,
        settings: ProviderSettings,
        adapter: std::result::Result<Arc<dyn TextGenerationProvider>, String>,
        breaker: Arc<dyn CircuitBreaker>,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        let (adapter, init_error) = match adapter {
            Ok(adapter) => (Some(adapter), None),
            Err(error) => (None, Some(error)),
        };
        let enabled = Self::enabled_predicate(&settings);
        Self {
            name: name.into(),
            settings,
            adapter,
            init_error,
            breaker,
            limiter,
            enabled: AtomicBool::new(enabled),
        }
    }

    fn enabled_predicate(settings: &ProviderSettings) -> bool {
        settings.enabled && settings.credentials_present()
    }

    /// Configured provider name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provider settings
    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Adapter, when it initialized
    pub fn adapter(&self) -> Option<&Arc<dyn TextGenerationProvider>> {
        self.adapter.as_ref()
    }

    /// Why the adapter failed to initialize
    pub fn init_error(&self) -> Option<&str> {
        self.init_error.as_deref()
    }

    /// Provider circuit breaker
    pub fn breaker(&self) -> &Arc<dyn CircuitBreaker> {
        &self.breaker
    }

    /// Provider rate limiter
    pub fn limiter(&self) -> &Arc<dyn RateLimiter> {
        &self.limiter
    }

    /// Enabled by configuration with credentials present
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enabled and backed by an initialized adapter
    pub fn is_selectable(&self) -> bool {
        self.is_enabled() && self.adapter.is_some()
    }

    /// Re-evaluate the enabled predicate against the current environment
    pub fn refresh_enabled(&self) -> bool {
        let enabled = Self::enabled_predicate(&self.settings);
        let previous = self.enabled.swap(enabled, Ordering::Relaxed);
        if previous != enabled {
            info!(provider = %self.name, enabled, "Provider enabled state changed");
        }
        enabled
    }

    /// Selector descriptor
    pub fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: self.name.clone(),
            display_name: self
                .settings
                .display_name
                .clone()
                .unwrap_or_else(|| self.name.clone()),
            default_model: self.settings.default_model.clone(),
            supported_models: self.settings.supported_models.clone(),
            is_enabled: self.is_enabled(),
            self_hosted: self.settings.self_hosted,
        }
    }

    /// Model a request runs on
    ///
    /// The requested model is kept when the provider lists it or lists no
    /// models; otherwise the default model is used.
    pub fn resolve_model(&self, requested: Option<&str>) -> String {
        let supported = &self.settings.supported_models;
        match requested.map(str::trim).filter(|m| !m.is_empty()) {
            Some(model) if supported.is_empty() || supported.iter().any(|m| m == model) => {
                model.to_string()
            }
            Some(model) => {
                warn!(
                    provider = %self.name,
                    requested = model,
                    default = %self.settings.default_model,
                    "Requested model not supported, using default"
                );
                self.settings.default_model.clone()
            }
            None => self.settings.default_model.clone(),
        }
    }
}

impl std::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("name", &self.name)
            .field("enabled", &self.is_enabled())
            .field("adapter", &self.adapter.as_ref().map(|a| a.provider_name()))
            .field("init_error", &self.init_error)
            .finish()
    }
}

/// Configured providers in fallback order
#[derive(Debug)]
pub struct ProviderRegistry {
    handles: Vec<Arc<ProviderHandle>>,
}

impl ProviderRegistry {
    /// Create a registry; handles are ordered by priority, then name
    pub fn new(handles: Vec<ProviderHandle>) -> Self {
        let mut handles: Vec<Arc<ProviderHandle>> = handles.into_iter().map(Arc::new).collect();
        handles.sort_by(|a, b| {
            a.settings
                .priority
                .cmp(&b.settings.priority)
                .then_with(|| a.name.cmp(&b.name))
        });
        Self { handles }
    }

    /// Handles in fallback order
    pub fn handles(&self) -> &[Arc<ProviderHandle>] {
        &self.handles
    }

    /// Handle by name
    pub fn get(&self, name: &str) -> Option<Arc<ProviderHandle>> {
        self.handles.iter().find(|h| h.name == name).cloned()
    }

    /// Descriptors in fallback order
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        self.handles.iter().map(|h| h.descriptor()).collect()
    }

    /// Re-evaluate every provider's enabled predicate
    pub fn refresh_enabled(&self) {
        for handle in &self.handles {
            handle.refresh_enabled();
        }
    }

    /// Provider used when a request names none
    ///
    /// An enabled self-hosted provider wins; otherwise the first enabled
    /// provider with an adapter.
    pub fn recommended(&self) -> Result<Arc<ProviderHandle>> {
        self.handles
            .iter()
            .find(|h| h.is_selectable() && h.settings.self_hosted)
            .or_else(|| self.handles.iter().find(|h| h.is_selectable()))
            .cloned()
            .ok_or_else(|| {
                Error::no_provider_available(format!(
                    "none of {} configured providers is enabled with a working adapter",
                    self.handles.len()
                ))
            })
    }

    /// Provider a request runs on
    ///
    /// The requested provider is used when it is known, enabled and has an
    /// adapter; otherwise the reason is logged and the fallback chain applies.
    pub fn resolve(&self, requested: Option<&str>) -> Result<Arc<ProviderHandle>> {
        let Some(name) = requested.map(str::trim).filter(|n| !n.is_empty()) else {
            return self.recommended();
        };

        let reason = match self.get(name) {
            Some(handle) if handle.is_selectable() => return Ok(handle),
            Some(handle) if !handle.is_enabled() => "provider is disabled",
            Some(_) => "provider adapter is not available",
            None => "provider is not configured",
        };

        let fallback = self.recommended()?;
        warn!(
            requested = name,
            reason,
            fallback = %fallback.name,
            "Falling back to another provider"
        );
        Ok(fallback)
    }
}
