//! Provider Registry & Tier Order
//!
//! Immutable, startup-built collections of provider instances in the order
//! the routers evaluate them.

use std::collections::HashMap;
use std::sync::Arc;

use relay_domain::constants::DEFAULT_EMBEDDING_PROVIDER_ORDER;
use relay_domain::ports::providers::{EmbeddingProvider, GenerationProvider};
use relay_domain::value_objects::ProviderTier;
use tracing::warn;

/// Generation providers ordered by tier
///
/// All primary providers come first in registration order, then fallback,
/// then local.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn GenerationProvider>>,
}

impl ProviderRegistry {
    /// Order `providers` by tier, keeping registration order within a tier
    pub fn new(providers: Vec<Arc<dyn GenerationProvider>>) -> Self {
        let mut providers = providers;
        // Vec::sort_by_key is stable
        providers.sort_by_key(|p| p.tier());
        Self { providers }
    }

    /// Providers in evaluation order
    pub fn providers_in_order(&self) -> &[Arc<dyn GenerationProvider>] {
        &self.providers
    }

    /// Look a provider up by name
    pub fn provider_by_name(&self, name: &str) -> Option<Arc<dyn GenerationProvider>> {
        self.providers.iter().find(|p| p.name() == name).cloned()
    }

    /// Providers belonging to `tier`
    pub fn providers_in_tier(&self, tier: ProviderTier) -> Vec<Arc<dyn GenerationProvider>> {
        self.providers
            .iter()
            .filter(|p| p.tier() == tier)
            .cloned()
            .collect()
    }

    /// Provider names in evaluation order
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

/// Configured embedding provider order
///
/// Parsed from a comma-separated list such as `"openai, ollama,null"`.
/// Items are trimmed, empty items dropped and repeated names ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingProviderOrder(Vec<String>);

impl EmbeddingProviderOrder {
    /// Parse a comma-separated order
    pub fn parse(order: &str) -> Self {
        let mut names: Vec<String> = Vec::new();
        for name in order.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        Self(names)
    }

    /// Names in order
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl Default for EmbeddingProviderOrder {
    fn default() -> Self {
        Self::parse(DEFAULT_EMBEDDING_PROVIDER_ORDER)
    }
}

/// Embedding providers in configured order
#[derive(Clone, Default)]
pub struct EmbeddingProviderSet {
    providers: Vec<Arc<dyn EmbeddingProvider>>,
}

impl EmbeddingProviderSet {
    /// Use `providers` in the given order
    pub fn new(providers: Vec<Arc<dyn EmbeddingProvider>>) -> Self {
        Self { providers }
    }

    /// Keep the configured names that resolve to an available provider
    ///
    /// Names in `order` without a matching entry in `available` are logged
    /// and skipped.
    pub fn from_order(
        order: &EmbeddingProviderOrder,
        available: &HashMap<String, Arc<dyn EmbeddingProvider>>,
    ) -> Self {
        let providers = order
            .names()
            .iter()
            .filter_map(|name| match available.get(name) {
                Some(provider) => Some(Arc::clone(provider)),
                None => {
                    warn!(provider = %name, "Embedding provider in order is not configured; skipping");
                    None
                }
            })
            .collect();
        Self { providers }
    }

    /// Providers in order
    pub fn providers(&self) -> &[Arc<dyn EmbeddingProvider>] {
        &self.providers
    }

    /// Provider names in order
    pub fn names(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|p| p.provider_name().to_string())
            .collect()
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for EmbeddingProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingProviderSet")
            .field("providers", &self.names())
            .finish()
    }
}
