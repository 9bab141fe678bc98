//! Failure mapping of the HTTP providers against unreachable endpoints

use std::time::Duration;

use relay_application::resilience::BackoffPolicy;
use relay_domain::error::Error;
use relay_domain::ports::providers::{EmbeddingProvider, GenerationProvider};
use relay_domain::value_objects::{ChatMessage, GenerateRequest, ProviderTier};
use relay_providers::embedding::OllamaEmbeddingProvider;
use relay_providers::generation::OllamaGenerationProvider;
use relay_providers::utils::HttpSettings;

// Port 9 (discard) is closed on test machines, so connects fail fast
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn fast_settings() -> HttpSettings {
    HttpSettings {
        timeout: Duration::from_secs(2),
        max_attempts: 1,
        backoff: BackoffPolicy::new(Duration::from_millis(1), Duration::from_millis(1)),
    }
}

#[tokio::test]
async fn test_unreachable_generation_provider_reports_connection_error() {
    let settings = fast_settings();
    let client = settings.build_client().expect("client");
    let provider = OllamaGenerationProvider::new(
        "local".to_string(),
        ProviderTier::Local,
        UNREACHABLE.to_string(),
        "llama3.2".to_string(),
        settings,
        client,
    );
    let request = GenerateRequest::new("").with_message(ChatMessage::user("hi"));

    let err = provider.generate(&request).await.expect_err("must fail");

    assert!(matches!(err, Error::Provider { .. }), "unexpected: {err:?}");
    assert!(err.to_string().starts_with("local request failed"));
    assert!(!provider.is_available().await);
}

#[tokio::test]
async fn test_unreachable_embedding_provider_is_unavailable() {
    let settings = fast_settings();
    let client = settings.build_client().expect("client");
    let provider = OllamaEmbeddingProvider::new(
        UNREACHABLE.to_string(),
        "nomic-embed-text".to_string(),
        None,
        settings,
        client,
    );

    assert!(provider.embed("text").await.is_err());
    assert!(!provider.is_available().await);
    assert!(provider.health_check().await.is_err());
}
