//! Embedding Router
//!
//! Same ordered failover as generation, with a simpler guard: each provider
//! has a consecutive-failure counter and is skipped for the rest of the
//! process once the counter reaches the threshold. There is no timed
//! re-enable; a success only resets the counter of a provider still in use.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use futures::future::join_all;
use relay_domain::constants::{DEFAULT_EMBEDDING_DIMENSIONS, EMBEDDING_FAILURE_THRESHOLD};
use relay_domain::error::{Error, Result};
use relay_domain::ports::infrastructure::AuditSink;
use relay_domain::ports::providers::EmbeddingProvider;
use relay_domain::value_objects::{
    Embedding, FailoverEvent, ProviderHealthReport, ProviderTier, RoutingOperation,
};
use tracing::{debug, instrument, warn};

use super::classify::classify_failure;
use super::record_failover;
use crate::registry::EmbeddingProviderSet;

/// Consecutive-failure counters keyed by provider name
pub struct EmbeddingFailureTracker {
    counts: DashMap<String, AtomicU32>,
    threshold: u32,
}

impl EmbeddingFailureTracker {
    /// Create a tracker disabling providers at `threshold` failures
    pub fn new(threshold: u32) -> Self {
        Self {
            counts: DashMap::new(),
            threshold,
        }
    }

    /// Current consecutive failures of `provider`
    pub fn failure_count(&self, provider: &str) -> u32 {
        self.counts
            .get(provider)
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }

    /// Whether `provider` has reached the threshold
    pub fn is_disabled(&self, provider: &str) -> bool {
        self.failure_count(provider) >= self.threshold
    }

    /// Reset the counter after a success
    pub fn record_success(&self, provider: &str) {
        if let Some(count) = self.counts.get(provider) {
            count.store(0, Ordering::SeqCst);
        }
    }

    /// Count a failure, returning the new consecutive total
    pub fn record_failure(&self, provider: &str) -> u32 {
        let count = self.counts.entry(provider.to_string()).or_default();
        count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Failure threshold
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for EmbeddingFailureTracker {
    fn default() -> Self {
        Self::new(EMBEDDING_FAILURE_THRESHOLD)
    }
}

/// Failover router for embeddings
pub struct EmbeddingRouter {
    providers: EmbeddingProviderSet,
    failures: EmbeddingFailureTracker,
    audit: Arc<dyn AuditSink>,
}

impl EmbeddingRouter {
    /// Create a router over `providers` in their configured order
    pub fn new(providers: EmbeddingProviderSet, audit: Arc<dyn AuditSink>) -> Self {
        Self::with_failure_threshold(providers, audit, EMBEDDING_FAILURE_THRESHOLD)
    }

    /// Create a router with a custom disablement threshold
    pub fn with_failure_threshold(
        providers: EmbeddingProviderSet,
        audit: Arc<dyn AuditSink>,
        threshold: u32,
    ) -> Self {
        Self {
            providers,
            failures: EmbeddingFailureTracker::new(threshold),
            audit,
        }
    }

    /// Embed one text on the first provider that succeeds
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn generate_embedding(&self, text: &str) -> Result<Embedding> {
        let text = text.to_string();
        self.route(move |provider| {
            let text = text.clone();
            async move { provider.embed(&text).await }
        })
        .await
    }

    /// Embed a batch on a single provider
    ///
    /// The whole batch is retried on the next provider when one fails. An
    /// empty batch returns immediately without touching any provider.
    #[instrument(skip(self, texts), fields(count = texts.len()))]
    pub async fn generate_batch_embeddings(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let texts = texts.to_vec();
        self.route(move |provider| {
            let texts = texts.clone();
            async move {
                let embeddings = provider.embed_batch(&texts).await?;
                if embeddings.len() != texts.len() {
                    return Err(Error::embedding(format!(
                        "{} returned {} embeddings for {} texts",
                        provider.provider_name(),
                        embeddings.len(),
                        texts.len()
                    )));
                }
                Ok(embeddings)
            }
        })
        .await
    }

    /// Dimensions of the active provider
    pub fn get_dimensions(&self) -> usize {
        self.active()
            .map_or(DEFAULT_EMBEDDING_DIMENSIONS, |p| p.dimensions())
    }

    /// First provider in order that has not been disabled
    pub fn get_active_provider(&self) -> Option<String> {
        self.active().map(|p| p.provider_name().to_string())
    }

    /// Consecutive failures recorded for `provider`
    pub fn failure_count(&self, provider: &str) -> u32 {
        self.failures.failure_count(provider)
    }

    /// Probe every provider's own availability check
    ///
    /// Embedding providers have no tier and are reported as `local`.
    pub async fn provider_health(&self) -> Vec<ProviderHealthReport> {
        let probes = self.providers.providers().iter().map(|provider| async move {
            ProviderHealthReport {
                name: provider.provider_name().to_string(),
                tier: ProviderTier::Local,
                available: provider.is_available().await,
            }
        });
        join_all(probes).await
    }

    /// Providers in configured order
    pub fn providers(&self) -> &EmbeddingProviderSet {
        &self.providers
    }

    fn active(&self) -> Option<&Arc<dyn EmbeddingProvider>> {
        self.providers
            .providers()
            .iter()
            .find(|p| !self.failures.is_disabled(p.provider_name()))
    }

    async fn route<T, F, Fut>(&self, call: F) -> Result<T>
    where
        F: Fn(Arc<dyn EmbeddingProvider>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let providers = self.providers.providers();
        if providers.is_empty() {
            return Err(Error::all_providers_failed(
                "no embedding providers configured",
            ));
        }

        let mut failures: Vec<String> = Vec::new();

        for (index, provider) in providers.iter().enumerate() {
            let name = provider.provider_name();
            if self.failures.is_disabled(name) {
                debug!(provider = name, "Skipping disabled embedding provider");
                continue;
            }

            match call(Arc::clone(provider)).await {
                Ok(value) => {
                    self.failures.record_success(name);
                    return Ok(value);
                }
                Err(e) => {
                    let count = self.failures.record_failure(name);
                    if count == self.failures.threshold() {
                        warn!(
                            provider = name,
                            failures = count,
                            "Embedding provider disabled after repeated failures"
                        );
                    }

                    let reason = classify_failure(&e);
                    let next = providers[index + 1..]
                        .iter()
                        .map(|p| p.provider_name())
                        .find(|next| !self.failures.is_disabled(next));
                    warn!(
                        provider = name,
                        next = next.unwrap_or("none"),
                        reason = %reason,
                        "Embedding provider failed: {}",
                        e
                    );
                    let event = FailoverEvent::new(
                        RoutingOperation::Embedding,
                        name,
                        next,
                        reason,
                        e.to_string(),
                    );
                    record_failover(self.audit.as_ref(), &event).await;
                    failures.push(format!("{name}: {e}"));
                }
            }
        }

        if failures.is_empty() {
            return Err(Error::all_providers_failed(
                "all embedding providers are disabled after repeated failures",
            ));
        }
        Err(Error::all_providers_failed(failures.join("; ")))
    }
}
