use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{GenerateRequest, GenerateResponse, ProviderTier};

/// Text Generation Provider Interface
///
/// Contract for an external inference backend. Implementations own their
/// transport and any internal retry; the generation router only sees one
/// `generate` attempt per provider per request.
///
/// # Example
///
/// ```ignore
/// use relay_domain::ports::providers::GenerationProvider;
///
/// if provider.is_available().await {
///     let response = provider.generate(&request).await?;
///     println!("{} answered: {}", provider.name(), response.text);
/// }
/// ```
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Produce a completion for `request`
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;

    /// Cheap reachability probe, independent of circuit-breaker state
    async fn is_available(&self) -> bool;

    /// Unique provider name
    fn name(&self) -> &str;

    /// Priority class of this provider
    fn tier(&self) -> ProviderTier;
}
