//! Ollama Embedding Provider
//!
//! Implements the EmbeddingProvider port using Ollama's local embedding API.
//! Supports various local embedding models like nomic-embed-text, all-minilm, etc.

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
    CONTENT_TYPE_JSON, EMBEDDING_DIMENSION_OLLAMA_DEFAULT, EMBEDDING_DIMENSION_OLLAMA_MINILM,
    EMBEDDING_DIMENSION_OLLAMA_MXBAI, EMBEDDING_DIMENSION_OLLAMA_NOMIC,
    OLLAMA_DEFAULT_EMBEDDING_MODEL, OLLAMA_DEFAULT_URL,
};
use crate::utils::{HttpResponseUtils, HttpSettings, f32_vector};

const PROVIDER_NAME: &str = "ollama";

/// Ollama embedding provider
///
/// Receives its HTTP client via constructor injection.
pub struct OllamaEmbeddingProvider {
    base_url: String,
    model: String,
    dimensions: Option<usize>,
    settings: HttpSettings,
    http_client: Client,
}

impl OllamaEmbeddingProvider {
    /// Create a new Ollama embedding provider
    ///
    /// # Arguments
    /// * `base_url` - Ollama server URL (e.g., "http://localhost:11434")
    /// * `model` - Model name (e.g., "nomic-embed-text")
    /// * `dimensions` - Override for models not in the built-in table
    /// * `settings` - Timeout and retry settings
    /// * `http_client` - Reqwest HTTP client for making API requests
    pub fn new(
        base_url: String,
        model: String,
        dimensions: Option<usize>,
        settings: HttpSettings,
        http_client: Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimensions,
            settings,
            http_client,
        }
    }

    /// Get the model name for this provider
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Fetch embedding for a single text
    async fn fetch_single_embedding(&self, text: &str) -> Result<serde_json::Value> {
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": text,
        });

        let response = self
            .http_client
            .post(format!("{}/api/embeddings", self.base_url))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.settings.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::send_error(PROVIDER_NAME, self.settings.timeout, &e))?;

        HttpResponseUtils::check_and_parse(response, PROVIDER_NAME).await
    }

    /// Parse embedding from response data
    fn parse_embedding(&self, response_data: &serde_json::Value) -> Result<Embedding> {
        let values = response_data["embedding"].as_array().ok_or_else(|| {
            Error::provider(PROVIDER_NAME, "Invalid response format: missing embedding array")
        })?;
        Ok(Embedding::new(f32_vector(values), self.model.clone()))
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        // Ollama's embeddings endpoint takes one prompt per call
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            let response_data = with_retry(
                || self.fetch_single_embedding(text),
                self.settings.max_attempts,
                self.settings.backoff,
                is_transient,
            )
            .await?;
            results.push(self.parse_embedding(&response_data)?);
        }

        Ok(results)
    }

    fn dimensions(&self) -> usize {
        if let Some(dimensions) = self.dimensions {
            return dimensions;
        }
        match self.model.as_str() {
            "nomic-embed-text" => EMBEDDING_DIMENSION_OLLAMA_NOMIC,
            "all-minilm" => EMBEDDING_DIMENSION_OLLAMA_MINILM,
            "mxbai-embed-large" => EMBEDDING_DIMENSION_OLLAMA_MXBAI,
            _ => EMBEDDING_DIMENSION_OLLAMA_DEFAULT,
        }
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn is_available(&self) -> bool {
        let response = self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.settings.timeout)
            .send()
            .await;
        HttpResponseUtils::probe_ok(&response)
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn ollama_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| OLLAMA_DEFAULT_URL.to_string());
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| OLLAMA_DEFAULT_EMBEDDING_MODEL.to_string());
    let settings = HttpSettings::from_extra(&config.extra)?;
    let http_client = settings.build_client()?;

    Ok(Arc::new(OllamaEmbeddingProvider::new(
        base_url,
        model,
        config.dimensions,
        settings,
        http_client,
    )))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static OLLAMA_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "ollama",
    description: "Ollama local embedding provider (nomic-embed-text, all-minilm, etc.)",
    factory: ollama_factory,
};
