//! OpenAI Embedding Provider
//!
//! Implements the EmbeddingProvider port using OpenAI's embedding API.
//! Supports text-embedding-3-small, text-embedding-3-large, and ada-002.

use std::sync::Arc;

use async_trait::async_trait;
use relay_application::ports::registry::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry,
};
use relay_application::resilience::{is_transient, with_retry};
use relay_domain::error::{Error, Result};
use relay_domain::ports::providers::EmbeddingProvider;
use relay_domain::value_objects::Embedding;
use reqwest::Client;

use crate::constants::{
    CONTENT_TYPE_JSON, EMBEDDING_DIMENSION_OPENAI_ADA, EMBEDDING_DIMENSION_OPENAI_LARGE,
    EMBEDDING_DIMENSION_OPENAI_SMALL, OPENAI_DEFAULT_EMBEDDING_MODEL, OPENAI_DEFAULT_URL,
};
use crate::utils::{HttpResponseUtils, HttpSettings, f32_vector};

const PROVIDER_NAME: &str = "openai";

/// OpenAI embedding provider
///
/// ## Example
///
/// ```rust,no_run
/// use relay_providers::embedding::OpenAIEmbeddingProvider;
/// use relay_providers::utils::HttpSettings;
///
/// let provider = OpenAIEmbeddingProvider::new(
///     "sk-your-api-key".to_string(),
///     None,
///     "text-embedding-3-small".to_string(),
///     HttpSettings::default(),
///     reqwest::Client::new(),
/// );
/// ```
pub struct OpenAIEmbeddingProvider {
    api_key: String,
    base_url: String,
    model: String,
    settings: HttpSettings,
    http_client: Client,
}

impl OpenAIEmbeddingProvider {
    /// Create a new OpenAI embedding provider
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: String,
        settings: HttpSettings,
        http_client: Client,
    ) -> Self {
        let base_url = base_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| OPENAI_DEFAULT_URL.to_string());
        Self {
            api_key: api_key.trim().to_string(),
            base_url,
            model,
            settings,
            http_client,
        }
    }

    /// Get the base URL for this provider
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send embedding request and get response data
    async fn fetch_embeddings(&self, texts: &[String]) -> Result<serde_json::Value> {
        let payload = serde_json::json!({
            "input": texts,
            "model": self.model,
            "encoding_format": "float"
        });

        let response = self
            .http_client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.settings.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::send_error(PROVIDER_NAME, self.settings.timeout, &e))?;

        HttpResponseUtils::check_and_parse(response, PROVIDER_NAME).await
    }

    /// Parse embedding vector from response data
    fn parse_embedding(&self, index: usize, item: &serde_json::Value) -> Result<Embedding> {
        let values = item["embedding"].as_array().ok_or_else(|| {
            Error::provider(
                PROVIDER_NAME,
                format!("Invalid embedding format for text {index}"),
            )
        })?;
        Ok(Embedding::new(f32_vector(values), self.model.clone()))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response_data = with_retry(
            || self.fetch_embeddings(texts),
            self.settings.max_attempts,
            self.settings.backoff,
            is_transient,
        )
        .await?;

        let data = response_data["data"].as_array().ok_or_else(|| {
            Error::provider(PROVIDER_NAME, "Invalid response format: missing data array")
        })?;

        if data.len() != texts.len() {
            return Err(Error::provider(
                PROVIDER_NAME,
                format!(
                    "Response data count mismatch: expected {}, got {}",
                    texts.len(),
                    data.len()
                ),
            ));
        }

        data.iter()
            .enumerate()
            .map(|(i, item)| self.parse_embedding(i, item))
            .collect()
    }

    fn dimensions(&self) -> usize {
        match self.model.as_str() {
            "text-embedding-3-large" => EMBEDDING_DIMENSION_OPENAI_LARGE,
            "text-embedding-ada-002" => EMBEDDING_DIMENSION_OPENAI_ADA,
            _ => EMBEDDING_DIMENSION_OPENAI_SMALL,
        }
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn is_available(&self) -> bool {
        let response = self
            .http_client
            .get(format!("{}/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.settings.timeout)
            .send()
            .await;
        HttpResponseUtils::probe_ok(&response)
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn openai_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| "OpenAI requires api_key".to_string())?;
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| OPENAI_DEFAULT_EMBEDDING_MODEL.to_string());
    let settings = HttpSettings::from_extra(&config.extra)?;
    let http_client = settings.build_client()?;

    Ok(Arc::new(OpenAIEmbeddingProvider::new(
        api_key,
        config.base_url.clone(),
        model,
        settings,
        http_client,
    )))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static OPENAI_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "openai",
    description: "OpenAI embedding provider (text-embedding-3-small/large, ada-002)",
    factory: openai_factory,
};
