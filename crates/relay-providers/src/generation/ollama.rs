//! Ollama Generation Provider
//!
//! Implements the GenerationProvider port using Ollama's local chat API.

use std::sync::Arc;

use async_trait::async_trait;
use relay_application::ports::registry::{
    GENERATION_PROVIDERS, GenerationProviderConfig, GenerationProviderEntry,
};
use relay_application::resilience::{is_transient, with_retry};
use relay_domain::error::{Error, Result};
use relay_domain::ports::providers::GenerationProvider;
use relay_domain::value_objects::{GenerateRequest, GenerateResponse, ProviderTier};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::helpers::chat_messages;
use crate::constants::{CONTENT_TYPE_JSON, OLLAMA_DEFAULT_CHAT_MODEL, OLLAMA_DEFAULT_URL};
use crate::utils::{HttpResponseUtils, HttpSettings, JsonExt};

/// Ollama generation provider
///
/// Talks to `/api/chat` with streaming disabled. Availability is probed
/// with `/api/tags`.
pub struct OllamaGenerationProvider {
    name: String,
    tier: ProviderTier,
    base_url: String,
    model: String,
    settings: HttpSettings,
    http_client: Client,
}

impl OllamaGenerationProvider {
    /// Create a new Ollama generation provider
    pub fn new(
        name: String,
        tier: ProviderTier,
        base_url: String,
        model: String,
        settings: HttpSettings,
        http_client: Client,
    ) -> Self {
        Self {
            name,
            tier,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            settings,
            http_client,
        }
    }

    /// Get the model name for this provider
    pub fn model(&self) -> &str {
        &self.model
    }

    fn payload(&self, request: &GenerateRequest) -> serde_json::Value {
        let mut options = serde_json::Map::new();
        if let Some(temperature) = request.temperature {
            options.insert("temperature".into(), json!(temperature));
        }
        if let Some(max_tokens) = request.max_output_tokens {
            options.insert("num_predict".into(), json!(max_tokens));
        }
        json!({
            "model": self.model,
            "messages": chat_messages(request),
            "stream": false,
            "options": options,
        })
    }

    async fn send_chat(&self, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .http_client
            .post(format!("{}/api/chat", self.base_url))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.settings.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::send_error(&self.name, self.settings.timeout, &e))?;

        HttpResponseUtils::check_and_parse(response, &self.name).await
    }
}

#[async_trait]
impl GenerationProvider for OllamaGenerationProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let payload = self.payload(request);
        let data = with_retry(
            || self.send_chat(&payload),
            self.settings.max_attempts,
            self.settings.backoff,
            is_transient,
        )
        .await?;

        let text = data
            .get("message")
            .and_then(|m| m.opt_str("content"))
            .ok_or_else(|| {
                Error::provider(&self.name, "Invalid response format: missing message content")
            })?;
        let tokens = data.u64_or("prompt_eval_count", 0) + data.u64_or("eval_count", 0);
        debug!(provider = %self.name, tokens, "Ollama chat completed");

        Ok(GenerateResponse::new(text, &self.model, tokens))
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

fn ollama_factory(
    config: &GenerationProviderConfig,
) -> std::result::Result<Arc<dyn GenerationProvider>, String> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| OLLAMA_DEFAULT_URL.to_string());
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| OLLAMA_DEFAULT_CHAT_MODEL.to_string());
    let settings = HttpSettings::from_extra(&config.extra)?;
    let http_client = settings.build_client()?;

    Ok(Arc::new(OllamaGenerationProvider::new(
        config.name.clone(),
        config.tier,
        base_url,
        model,
        settings,
        http_client,
    )))
}

#[linkme::distributed_slice(GENERATION_PROVIDERS)]
static OLLAMA_PROVIDER: GenerationProviderEntry = GenerationProviderEntry {
    name: "ollama",
    description: "Ollama local generation provider (/api/chat)",
    factory: ollama_factory,
};
