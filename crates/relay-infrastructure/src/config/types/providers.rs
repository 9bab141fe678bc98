//! Provider configuration types
//!
//! ```toml
//! [[providers.generation]]
//! name = "cloud"
//! provider = "openai"
//! tier = "primary"
//! api_key = "sk-..."
//!
//! [[providers.generation]]
//! name = "local"
//! provider = "ollama"
//! tier = "local"
//!
//! [providers.embedding]
//! order = "openai,ollama,null"
//!
//! [providers.embedding.providers.ollama]
//! model = "nomic-embed-text"
//! ```

use std::collections::HashMap;

use relay_application::ports::registry::{EmbeddingProviderConfig, GenerationProviderConfig};
use relay_domain::constants::{DEFAULT_EMBEDDING_PROVIDER_ORDER, EMBEDDING_FAILURE_THRESHOLD};
use relay_domain::value_objects::ProviderTier;
use serde::{Deserialize, Serialize};

/// One generation provider instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationProviderSettings {
    /// Unique instance name used for breakers, usage and audit
    pub name: String,
    /// Registered factory name (e.g., "openai", "ollama", "null")
    pub provider: String,
    /// Tier the instance is evaluated in
    pub tier: ProviderTier,
    /// Model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key for authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL for the provider API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Provider-specific settings
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, String>,
}

impl GenerationProviderSettings {
    /// Settings for `provider` registered as `name` in `tier`
    pub fn new(name: impl Into<String>, provider: impl Into<String>, tier: ProviderTier) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            tier,
            model: None,
            api_key: None,
            base_url: None,
            extra: HashMap::new(),
        }
    }

    /// Factory configuration for the linkme registry
    pub fn to_registry_config(&self) -> GenerationProviderConfig {
        GenerationProviderConfig {
            name: self.name.clone(),
            provider: self.provider.clone(),
            tier: self.tier,
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// Settings for one embedding provider, keyed by its factory name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingProviderSettings {
    /// Model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key for authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL for the provider API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Embedding dimensions (if configurable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,
    /// Provider-specific settings
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, String>,
}

impl EmbeddingProviderSettings {
    /// Factory configuration for the provider registered as `provider`
    pub fn to_registry_config(&self, provider: &str) -> EmbeddingProviderConfig {
        EmbeddingProviderConfig {
            provider: provider.to_string(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            dimensions: self.dimensions,
            extra: self.extra.clone(),
        }
    }
}

/// Embedding providers and their fallback order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingProvidersConfig {
    /// Comma-separated provider order
    pub order: String,
    /// Consecutive failures after which a provider is skipped for the process lifetime
    pub failure_threshold: u32,
    /// Per-provider settings keyed by factory name
    pub providers: HashMap<String, EmbeddingProviderSettings>,
}

impl Default for EmbeddingProvidersConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_EMBEDDING_PROVIDER_ORDER.to_string(),
            failure_threshold: EMBEDDING_FAILURE_THRESHOLD,
            providers: HashMap::from([("null".to_string(), EmbeddingProviderSettings::default())]),
        }
    }
}

/// Provider configurations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Generation provider instances in registration order
    pub generation: Vec<GenerationProviderSettings>,
    /// Embedding provider configuration
    pub embedding: EmbeddingProvidersConfig,
}

/// Defaults to one offline echo provider so a bare install can route requests
impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            generation: vec![GenerationProviderSettings::new(
                "echo",
                "null",
                ProviderTier::Local,
            )],
            embedding: EmbeddingProvidersConfig::default(),
        }
    }
}
