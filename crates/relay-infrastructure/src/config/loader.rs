//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use relay_domain::error::{Error, Result};

use crate::config::{AppConfig, AuditSinkKind, GenerationProviderSettings};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
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
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `RELAY__USAGE__DAILY_REQUEST_LIMIT`)
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

        // Double underscore separates nested keys so single underscores stay in field names
        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
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
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_resilience_config(config)?;
    validate_generation_providers(&config.providers.generation)?;
    validate_embedding_config(config)?;
    validate_usage_config(config)?;
    validate_audit_config(config)?;
    Ok(())
}

fn validate_resilience_config(config: &AppConfig) -> Result<()> {
    let resilience = &config.resilience;
    if resilience.failure_threshold == 0 {
        return Err(Error::configuration(
            "Circuit breaker failure threshold cannot be 0",
        ));
    }
    if resilience.success_threshold == 0 {
        return Err(Error::configuration(
            "Circuit breaker success threshold cannot be 0",
        ));
    }
    if resilience.call_timeout_secs == 0 {
        return Err(Error::configuration("Call timeout cannot be 0"));
    }
    if resilience.reset_timeout_secs == 0 {
        return Err(Error::configuration("Reset timeout cannot be 0"));
    }
    if resilience.half_open_max_requests == Some(0) {
        return Err(Error::configuration(
            "Half-open request limit cannot be 0",
        ));
    }
    Ok(())
}

fn validate_generation_providers(providers: &[GenerationProviderSettings]) -> Result<()> {
    let mut seen = HashSet::new();
    for provider in providers {
        if provider.name.trim().is_empty() {
            return Err(Error::configuration(
                "Generation provider name cannot be empty",
            ));
        }
        if provider.provider.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Generation provider '{}' has no provider type",
                provider.name
            )));
        }
        if !seen.insert(provider.name.as_str()) {
            return Err(Error::configuration(format!(
                "Duplicate generation provider name '{}'",
                provider.name
            )));
        }
    }
    Ok(())
}

fn validate_embedding_config(config: &AppConfig) -> Result<()> {
    if config.providers.embedding.failure_threshold == 0 {
        return Err(Error::configuration(
            "Embedding failure threshold cannot be 0",
        ));
    }
    Ok(())
}

fn validate_usage_config(config: &AppConfig) -> Result<()> {
    let usage = &config.usage;
    if !usage.enabled {
        return Ok(());
    }
    if usage.daily_request_limit == 0
        || usage.daily_token_limit == 0
        || usage.requests_per_minute == 0
    {
        return Err(Error::configuration(
            "Usage limits cannot be 0 when usage tracking is enabled",
        ));
    }
    if !(usage.warning_ratio > 0.0 && usage.warning_ratio <= 1.0) {
        return Err(Error::configuration(format!(
            "Usage warning ratio must be in (0, 1], got {}",
            usage.warning_ratio
        )));
    }
    if let Some(tracked) = &usage.tracked_provider
        && !config.providers.generation.iter().any(|p| &p.name == tracked)
    {
        return Err(Error::configuration(format!(
            "Tracked provider '{tracked}' is not a configured generation provider"
        )));
    }
    Ok(())
}

fn validate_audit_config(config: &AppConfig) -> Result<()> {
    match config.audit.sink {
        AuditSinkKind::Jsonl if config.audit.path.is_none() => Err(Error::configuration(
            "Audit path is required for the jsonl sink",
        )),
        AuditSinkKind::Memory if config.audit.capacity == 0 => Err(Error::configuration(
            "Audit capacity cannot be 0 for the memory sink",
        )),
        _ => Ok(()),
    }
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the generation providers
    pub fn with_generation_providers(mut self, providers: Vec<GenerationProviderSettings>) -> Self {
        self.config.providers.generation = providers;
        self
    }

    /// Set the embedding order
    pub fn with_embedding_order(mut self, order: impl Into<String>) -> Self {
        self.config.providers.embedding.order = order.into();
        self
    }

    /// Set usage configuration
    pub fn with_usage(mut self, usage: relay_application::usage::UsageConfig) -> Self {
        self.config.usage = usage;
        self
    }

    /// Set audit configuration
    pub fn with_audit(mut self, audit: crate::config::AuditConfig) -> Self {
        self.config.audit = audit;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
