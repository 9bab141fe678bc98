use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::value_objects::Embedding;

/// Embedding Provider Interface
///
/// Contract for services that turn text into dense vectors. The embedding
/// router holds an ordered list of these and fails over between them.
///
/// # Default Implementations
///
/// `embed()` delegates to `embed_batch()` with a single item, and
/// `is_available()` runs `health_check()`. Providers only need to implement
/// `embed_batch()`, `dimensions()` and `provider_name()`.
///
/// # Example
///
/// ```ignore
/// use relay_domain::ports::providers::EmbeddingProvider;
///
/// let embedding = provider.embed("fn main() {}").await?;
/// assert_eq!(embedding.dimensions, provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get embedding for a single text (default implementation provided)
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("No embedding returned"))
    }

    /// Get embeddings for multiple texts (must be implemented by provider)
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Dimensionality of the vectors this provider produces
    fn dimensions(&self) -> usize;

    /// Unique name of this provider instance (e.g., "openai", "ollama")
    fn provider_name(&self) -> &str;

    /// Health check for the provider (default implementation provided)
    async fn health_check(&self) -> Result<()> {
        self.embed("health check").await?;
        Ok(())
    }

    /// Lightweight availability probe
    async fn is_available(&self) -> bool {
        self.health_check().await.is_ok()
    }
}
