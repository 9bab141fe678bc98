//! Tests for the offline null providers

use relay_domain::ports::providers::{EmbeddingProvider, GenerationProvider};
use relay_domain::value_objects::{ChatMessage, GenerateRequest, ProviderTier};
use relay_providers::embedding::NullEmbeddingProvider;
use relay_providers::generation::NullGenerationProvider;

#[tokio::test]
async fn test_null_generation_echoes_last_user_message() {
    let provider = NullGenerationProvider::new("echo", ProviderTier::Local);
    let request = GenerateRequest::new("sys")
        .with_message(ChatMessage::user("first"))
        .with_message(ChatMessage::assistant("reply"))
        .with_message(ChatMessage::user("second question"));

    let response = provider.generate(&request).await.expect("generate");

    assert_eq!(response.text, "[echo] second question");
    assert_eq!(response.model_used, "null");
    assert!(response.tokens_used > 0);
    assert!(provider.is_available().await);
    assert_eq!(provider.tier(), ProviderTier::Local);
}

#[tokio::test]
async fn test_null_embedding_is_deterministic() {
    let provider = NullEmbeddingProvider::new();

    let a = provider.embed("hello world").await.expect("embed");
    let b = provider.embed("hello world").await.expect("embed");
    let c = provider.embed("something else").await.expect("embed");

    assert_eq!(a.vector, b.vector);
    assert_ne!(a.vector, c.vector);
    assert_eq!(a.vector.len(), 384);
    assert!(a.vector.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[tokio::test]
async fn test_null_embedding_batch_keeps_input_order() {
    let provider = NullEmbeddingProvider::with_dimensions(16);
    let texts = vec!["a".to_string(), "b".to_string(), "a".to_string()];

    let embeddings = provider.embed_batch(&texts).await.expect("batch");

    assert_eq!(embeddings.len(), 3);
    assert_eq!(embeddings[0].vector, embeddings[2].vector);
    assert_ne!(embeddings[0].vector, embeddings[1].vector);
    assert!(embeddings.iter().all(|e| e.dimensions == 16));
    assert!(provider.health_check().await.is_ok());
}
