//! Tests for linkme registration of the bundled providers

use relay_application::ports::registry::{
    EmbeddingProviderConfig, GenerationProviderConfig, list_embedding_providers,
    list_generation_providers, resolve_embedding_provider, resolve_generation_provider,
};
use relay_domain::value_objects::ProviderTier;

// Referencing the crate keeps its distributed slice entries linked in
use relay_providers as _;

#[test]
fn test_all_generation_providers_registered() {
    let names: Vec<&str> = list_generation_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    for expected in ["null", "ollama", "openai"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
}

#[test]
fn test_all_embedding_providers_registered() {
    let names: Vec<&str> = list_embedding_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    for expected in ["null", "ollama", "openai"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
}

#[test]
fn test_generation_instance_keeps_configured_name_and_tier() {
    let config = GenerationProviderConfig::new("backup", "null", ProviderTier::Fallback);
    let provider = resolve_generation_provider(&config).expect("resolve");
    assert_eq!(provider.name(), "backup");
    assert_eq!(provider.tier(), ProviderTier::Fallback);
}

#[test]
fn test_openai_requires_api_key() {
    let generation = GenerationProviderConfig::new("cloud", "openai", ProviderTier::Primary);
    let err = resolve_generation_provider(&generation).err().unwrap_or_default();
    assert!(err.contains("api_key"), "unexpected error: {err}");

    let embedding = EmbeddingProviderConfig::new("openai");
    let err = resolve_embedding_provider(&embedding).err().unwrap_or_default();
    assert!(err.contains("api_key"), "unexpected error: {err}");
}

#[test]
fn test_invalid_http_extra_is_rejected() {
    let config = EmbeddingProviderConfig::new("ollama").with_extra("timeout_secs", "never");
    let err = resolve_embedding_provider(&config).err().unwrap_or_default();
    assert!(err.contains("timeout_secs"), "unexpected error: {err}");
}

#[test]
fn test_embedding_dimensions_follow_model() {
    let nomic = resolve_embedding_provider(&EmbeddingProviderConfig::new("ollama"))
        .expect("resolve ollama");
    assert_eq!(nomic.dimensions(), 768);
    assert_eq!(nomic.provider_name(), "ollama");

    let minilm = resolve_embedding_provider(
        &EmbeddingProviderConfig::new("ollama").with_model("all-minilm"),
    )
    .expect("resolve ollama");
    assert_eq!(minilm.dimensions(), 384);

    let large = resolve_embedding_provider(
        &EmbeddingProviderConfig::new("openai")
            .with_api_key("sk-test")
            .with_model("text-embedding-3-large"),
    )
    .expect("resolve openai");
    assert_eq!(large.dimensions(), 3072);

    let null = resolve_embedding_provider(&EmbeddingProviderConfig::new("null").with_dimensions(32))
        .expect("resolve null");
    assert_eq!(null.dimensions(), 32);
}
