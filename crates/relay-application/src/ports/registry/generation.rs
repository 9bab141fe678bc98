//! Generation Provider Registry
//!
//! Same registration scheme as the embedding registry, for text generation
//! backends. One factory can back several configured instances: two
//! OpenAI-compatible endpoints are both built by the `openai` factory under
//! different instance names.

use std::collections::HashMap;
use std::sync::Arc;

use relay_domain::ports::providers::GenerationProvider;
use relay_domain::value_objects::ProviderTier;

use super::entry::{ProviderEntry, describe, resolve};

/// Configuration for generation provider creation
#[derive(Debug, Clone)]
pub struct GenerationProviderConfig {
    /// Instance name used for routing, breakers and audit (e.g., "groq")
    pub name: String,
    /// Registered factory to build it with (e.g., "openai", "ollama", "null")
    pub provider: String,
    /// Priority class
    pub tier: ProviderTier,
    /// Model name/identifier
    pub model: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Base URL for the provider API
    pub base_url: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl GenerationProviderConfig {
    /// Create a config for instance `name` built by factory `provider`
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

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add extra configuration
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for generation providers
///
/// Submitted by provider crates with
/// `#[linkme::distributed_slice(GENERATION_PROVIDERS)]`.
pub type GenerationProviderEntry = ProviderEntry<GenerationProviderConfig, dyn GenerationProvider>;

/// Every generation provider factory linked into the binary
#[linkme::distributed_slice]
pub static GENERATION_PROVIDERS: [GenerationProviderEntry] = [..];

/// Build the generation provider whose factory is named by `config.provider`
pub fn resolve_generation_provider(
    config: &GenerationProviderConfig,
) -> Result<Arc<dyn GenerationProvider>, String> {
    resolve(&GENERATION_PROVIDERS[..], "generation", &config.provider, config)
}

/// Registered generation factories as (name, description), sorted by name
pub fn list_generation_providers() -> Vec<(&'static str, &'static str)> {
    describe(&GENERATION_PROVIDERS[..])
}
