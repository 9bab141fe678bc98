//! Provider resolution
//!
//! Turns provider settings into instances through the linkme registry.
//!
//! ```text
//! AppConfig → settings → linkme registry → Arc<dyn Provider> → ProviderRegistry / EmbeddingProviderSet
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use relay_application::ports::registry::{resolve_embedding_provider, resolve_generation_provider};
use relay_application::registry::{EmbeddingProviderOrder, EmbeddingProviderSet, ProviderRegistry};
use relay_domain::error::{Error, Result};
use relay_domain::ports::providers::EmbeddingProvider;
use tracing::debug;

use crate::config::{EmbeddingProvidersConfig, GenerationProviderSettings};

// Keep the provider crate linked so its registry entries are present
use relay_providers as _;

/// Resolve every configured generation provider and order them by tier
pub fn resolve_generation_providers(
    settings: &[GenerationProviderSettings],
) -> Result<ProviderRegistry> {
    let providers = settings
        .iter()
        .map(|s| {
            debug!(name = %s.name, provider = %s.provider, tier = %s.tier, "Resolving generation provider");
            resolve_generation_provider(&s.to_registry_config()).map_err(|e| {
                Error::configuration(format!("Generation provider '{}': {e}", s.name))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ProviderRegistry::new(providers))
}

/// Resolve the embedding providers named in the configured order
///
/// Only names that appear in the order are instantiated. A name in the
/// order without settings falls back to the provider's defaults when its
/// factory accepts them and is skipped otherwise.
pub fn resolve_embedding_providers(config: &EmbeddingProvidersConfig) -> Result<EmbeddingProviderSet> {
    let order = EmbeddingProviderOrder::parse(&config.order);
    let mut available: HashMap<String, Arc<dyn EmbeddingProvider>> = HashMap::new();

    for name in order.names() {
        let explicit = config.providers.get(name);
        let registry_config = explicit
            .cloned()
            .unwrap_or_default()
            .to_registry_config(name);
        match resolve_embedding_provider(&registry_config) {
            Ok(provider) => {
                available.insert(name.clone(), provider);
            }
            Err(e) if explicit.is_some() => {
                return Err(Error::configuration(format!(
                    "Embedding provider '{name}': {e}"
                )));
            }
            Err(e) => {
                debug!(provider = %name, error = %e, "Embedding provider has no usable defaults");
            }
        }
    }

    Ok(EmbeddingProviderSet::from_order(&order, &available))
}
