//! Provider registry and embedding order tests

use std::collections::HashMap;
use std::sync::Arc;

use relay_application::registry::{EmbeddingProviderOrder, EmbeddingProviderSet, ProviderRegistry};
use relay_domain::ports::providers::{EmbeddingProvider, GenerationProvider};
use relay_domain::value_objects::ProviderTier;

use crate::test_utils::{MockEmbeddingProvider, MockGenerationProvider};

fn generation(name: &str, tier: ProviderTier) -> Arc<dyn GenerationProvider> {
    Arc::new(MockGenerationProvider::new(name, tier))
}

#[test]
fn test_tier_order_is_stable_within_tier() {
    let registry = ProviderRegistry::new(vec![
        generation("ollama", ProviderTier::Local),
        generation("groq", ProviderTier::Fallback),
        generation("gemini", ProviderTier::Primary),
        generation("openrouter", ProviderTier::Fallback),
        generation("claude", ProviderTier::Primary),
    ]);

    assert_eq!(
        registry.names(),
        ["gemini", "claude", "groq", "openrouter", "ollama"]
    );
    assert_eq!(registry.providers_in_tier(ProviderTier::Fallback).len(), 2);
}

#[test]
fn test_lookup_by_name() {
    let registry = ProviderRegistry::new(vec![generation("gemini", ProviderTier::Primary)]);

    assert!(registry.provider_by_name("gemini").is_some());
    assert!(registry.provider_by_name("missing").is_none());
}

#[test]
fn test_embedding_set_follows_configured_order_and_skips_unknown() {
    let mut available: HashMap<String, Arc<dyn EmbeddingProvider>> = HashMap::new();
    available.insert("null".into(), Arc::new(MockEmbeddingProvider::new("null", 8)));
    available.insert("ollama".into(), Arc::new(MockEmbeddingProvider::new("ollama", 768)));

    let order = EmbeddingProviderOrder::parse("ollama, voyage, null");
    let set = EmbeddingProviderSet::from_order(&order, &available);

    assert_eq!(set.names(), ["ollama", "null"]);
}

#[test]
fn test_embedding_set_from_empty_order() {
    let available: HashMap<String, Arc<dyn EmbeddingProvider>> = HashMap::new();
    let set = EmbeddingProviderSet::from_order(&EmbeddingProviderOrder::parse(""), &available);
    assert!(set.is_empty());
}
