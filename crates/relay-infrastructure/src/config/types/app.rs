//! Main application configuration

use relay_application::usage::UsageConfig;
use serde::{Deserialize, Serialize};

pub use super::audit::{AuditConfig, AuditSinkKind};
pub use super::logging::LoggingConfig;
pub use super::providers::{
    EmbeddingProviderSettings, EmbeddingProvidersConfig, GenerationProviderSettings,
    ProvidersConfig,
};
pub use super::resilience::ResilienceConfig;

/// Complete Relay configuration, read once at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Provider instances and embedding order
    pub providers: ProvidersConfig,
    /// Circuit breaker settings
    pub resilience: ResilienceConfig,
    /// Quota settings
    pub usage: UsageConfig,
    /// Failover audit sink
    pub audit: AuditConfig,
}
