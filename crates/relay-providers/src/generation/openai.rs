//! OpenAI-Compatible Generation Provider
//!
//! Implements the GenerationProvider port against any endpoint speaking the
//! OpenAI chat completions protocol (OpenAI, Groq, OpenRouter, vLLM, ...).

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
use crate::constants::{CONTENT_TYPE_JSON, OPENAI_DEFAULT_CHAT_MODEL, OPENAI_DEFAULT_URL};
use crate::utils::{HttpResponseUtils, HttpSettings, JsonExt};

/// OpenAI-compatible generation provider
///
/// ## Example
///
/// ```rust,no_run
/// use relay_providers::generation::OpenAIGenerationProvider;
/// use relay_providers::utils::HttpSettings;
/// use relay_domain::value_objects::ProviderTier;
///
/// let settings = HttpSettings::default();
/// let provider = OpenAIGenerationProvider::new(
///     "groq".to_string(),
///     ProviderTier::Fallback,
///     "gsk-your-key".to_string(),
///     Some("https://api.groq.com/openai/v1".to_string()),
///     "llama-3.1-8b-instant".to_string(),
///     settings,
///     reqwest::Client::new(),
/// );
/// ```
pub struct OpenAIGenerationProvider {
    name: String,
    tier: ProviderTier,
    api_key: String,
    base_url: String,
    model: String,
    settings: HttpSettings,
    http_client: Client,
}

impl OpenAIGenerationProvider {
    /// Create a new OpenAI-compatible generation provider
    pub fn new(
        name: String,
        tier: ProviderTier,
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
            name,
            tier,
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

    fn payload(&self, request: &GenerateRequest) -> serde_json::Value {
        let mut payload = json!({
            "model": self.model,
            "messages": chat_messages(request),
        });
        if let Some(temperature) = request.temperature {
            payload["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = request.max_output_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }
        payload
    }

    async fn send_chat(&self, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
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
impl GenerationProvider for OpenAIGenerationProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let payload = self.payload(request);
        let data = with_retry(
            || self.send_chat(&payload),
            self.settings.max_attempts,
            self.settings.backoff,
            is_transient,
        )
        .await?;

        let text = data["choices"]
            .get(0)
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.opt_str("content"))
            .ok_or_else(|| {
                Error::provider(&self.name, "Invalid response format: missing choices[0].message")
            })?;
        let tokens = data
            .get("usage")
            .map_or(0, |usage| usage.u64_or("total_tokens", 0));
        let model = data.str_or("model", &self.model);
        debug!(provider = %self.name, model, tokens, "Chat completion finished");

        Ok(GenerateResponse::new(text, model, tokens))
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

fn openai_factory(
    config: &GenerationProviderConfig,
) -> std::result::Result<Arc<dyn GenerationProvider>, String> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| format!("Provider '{}' (openai) requires api_key", config.name))?;
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| OPENAI_DEFAULT_CHAT_MODEL.to_string());
    let settings = HttpSettings::from_extra(&config.extra)?;
    let http_client = settings.build_client()?;

    Ok(Arc::new(OpenAIGenerationProvider::new(
        config.name.clone(),
        config.tier,
        api_key,
        config.base_url.clone(),
        model,
        settings,
        http_client,
    )))
}

#[linkme::distributed_slice(GENERATION_PROVIDERS)]
static OPENAI_PROVIDER: GenerationProviderEntry = GenerationProviderEntry {
    name: "openai",
    description: "OpenAI-compatible chat completions provider (OpenAI, Groq, OpenRouter, ...)",
    factory: openai_factory,
};
