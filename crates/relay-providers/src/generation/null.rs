//! Null generation provider for testing and development
//!
//! Echoes the last user message back. No external dependencies - always
//! works offline.

use std::sync::Arc;

use async_trait::async_trait;
use relay_application::ports::registry::{
    GENERATION_PROVIDERS, GenerationProviderConfig, GenerationProviderEntry,
};
use relay_domain::error::Result;
use relay_domain::ports::providers::GenerationProvider;
use relay_domain::value_objects::{GenerateRequest, GenerateResponse, ProviderTier};

use super::helpers::estimate_tokens;

/// Null generation provider
///
/// # Example
///
/// ```rust
/// use relay_providers::generation::NullGenerationProvider;
/// use relay_domain::ports::providers::GenerationProvider;
/// use relay_domain::value_objects::ProviderTier;
///
/// let provider = NullGenerationProvider::new("echo", ProviderTier::Local);
/// assert_eq!(provider.name(), "echo");
/// ```
pub struct NullGenerationProvider {
    name: String,
    tier: ProviderTier,
}

impl NullGenerationProvider {
    /// Create a null provider with an instance name and tier
    pub fn new(name: impl Into<String>, tier: ProviderTier) -> Self {
        Self {
            name: name.into(),
            tier,
        }
    }
}

#[async_trait]
impl GenerationProvider for NullGenerationProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let prompt = request.last_user_message().unwrap_or_default();
        let text = format!("[{}] {}", self.name, prompt);
        let tokens = estimate_tokens(&request.system_instruction) + estimate_tokens(&text);
        Ok(GenerateResponse::new(text, "null", tokens))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> ProviderTier {
        self.tier
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn null_factory(
    config: &GenerationProviderConfig,
) -> std::result::Result<Arc<dyn GenerationProvider>, String> {
    Ok(Arc::new(NullGenerationProvider::new(
        config.name.clone(),
        config.tier,
    )))
}

#[linkme::distributed_slice(GENERATION_PROVIDERS)]
static NULL_PROVIDER: GenerationProviderEntry = GenerationProviderEntry {
    name: "null",
    description: "Null provider for testing (echoes the last user message)",
    factory: null_factory,
};
