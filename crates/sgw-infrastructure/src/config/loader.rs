//! Configuration loader
//!
//! Loads configuration from defaults, a TOML file and environment variables
//! using Figment.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use sgw_domain::constants::RATE_LIMIT_WINDOW_SECS;
use sgw_domain::error::{Error, Result};
use sgw_domain::value_objects::ProviderSettings;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `SGW_PROVIDERS__OPENAI__ENABLED`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    ///
    /// Looks in the working directory, `./sgw/`, the platform config
    /// directory and `~/.sgw/`, in that order.
    pub fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    for (name, settings) in &config.providers {
        validate_provider_settings(name, settings)?;
    }
    validate_pricing(config)?;
    validate_runtime(config)?;
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::configuration(message)
}

fn validate_provider_settings(name: &str, settings: &ProviderSettings) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid("Provider name cannot be empty".to_string()));
    }
    let threshold = settings.error_rate_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(invalid(format!(
            "providers.{name}.error_rate_threshold must be in (0, 1], got {threshold}"
        )));
    }
    let positive = [
        ("min_sample", u64::from(settings.min_sample)),
        ("rate_limit_per_minute", u64::from(settings.rate_limit_per_minute)),
        ("max_tokens_out", u64::from(settings.max_tokens_out)),
        ("max_output_length", settings.max_output_length as u64),
        ("timeout_ms", settings.timeout_ms),
    ];
    if let Some((field, _)) = positive.iter().find(|(_, value)| *value == 0) {
        return Err(invalid(format!("providers.{name}.{field} cannot be 0")));
    }
    if settings.default_model.trim().is_empty() && settings.supported_models.is_empty() {
        return Err(invalid(format!(
            "providers.{name} needs a default_model or supported_models"
        )));
    }
    if !settings.supported_models.is_empty()
        && !settings.supported_models.contains(&settings.default_model)
    {
        return Err(invalid(format!(
            "providers.{name}.default_model '{}' is not in supported_models",
            settings.default_model
        )));
    }
    Ok(())
}

fn validate_pricing(config: &AppConfig) -> Result<()> {
    for (model, price) in &config.pricing {
        let valid = |value: f64| value.is_finite() && value >= 0.0;
        if !valid(price.input_per_1k) || !valid(price.output_per_1k) {
            return Err(invalid(format!(
                "pricing.{model} must hold non-negative finite prices"
            )));
        }
    }
    Ok(())
}

fn validate_runtime(config: &AppConfig) -> Result<()> {
    if config.rate_limiter.max_keys == 0 {
        return Err(invalid("rate_limiter.max_keys cannot be 0".to_string()));
    }
    if config.rate_limiter.key_ttl_secs < RATE_LIMIT_WINDOW_SECS {
        return Err(invalid(format!(
            "rate_limiter.key_ttl_secs must be at least the {RATE_LIMIT_WINDOW_SECS}s rate limit window, got {}",
            config.rate_limiter.key_ttl_secs
        )));
    }
    if config.health.probe_timeout_ms == 0 {
        return Err(invalid("health.probe_timeout_ms cannot be 0".to_string()));
    }
    if config.sanitizer.fallback_text.trim().is_empty() {
        return Err(invalid("sanitizer.fallback_text cannot be empty".to_string()));
    }
    Ok(())
}
