//! Generation Router
//!
//! Tries generation providers in tier order, each behind its own circuit
//! breaker, after a single quota check for the tracked provider. Every
//! failed attempt is classified and written to the audit sink.

use std::sync::Arc;

use futures::future::join_all;
use relay_domain::error::{Error, Result};
use relay_domain::ports::infrastructure::AuditSink;
use relay_domain::value_objects::{
    FailoverEvent, GenerateRequest, GenerateResponse, ProviderHealthReport, RoutingOperation,
};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::classify::classify_failure;
use super::record_failover;
use crate::registry::ProviderRegistry;
use crate::resilience::{CircuitBreakerRegistry, CircuitBreakerState};
use crate::usage::UsageTracker;

/// Failover router for text generation
pub struct GenerationRouter {
    registry: ProviderRegistry,
    breakers: Arc<CircuitBreakerRegistry>,
    usage: Arc<UsageTracker>,
    audit: Arc<dyn AuditSink>,
    tracked_provider: Option<String>,
}

impl GenerationRouter {
    /// Build a router and create a breaker for every registered provider
    ///
    /// The tracked provider is the one named in the usage configuration, or
    /// the first provider in tier order.
    pub fn new(
        registry: ProviderRegistry,
        breakers: Arc<CircuitBreakerRegistry>,
        usage: Arc<UsageTracker>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        for provider in registry.providers_in_order() {
            breakers.get(provider.name());
        }

        let tracked_provider = usage.config().tracked_provider.clone().or_else(|| {
            registry
                .providers_in_order()
                .first()
                .map(|p| p.name().to_string())
        });

        info!(
            providers = ?registry.names(),
            tracked = tracked_provider.as_deref().unwrap_or("none"),
            "Generation router ready"
        );

        Self {
            registry,
            breakers,
            usage,
            audit,
            tracked_provider,
        }
    }

    /// Generate a completion, failing over across providers
    #[instrument(skip(self, request), fields(messages = request.messages.len()))]
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        request.validate()?;

        if let Some(tracked) = &self.tracked_provider {
            let decision = self.usage.can_make_request(tracked);
            if !decision.allowed {
                let reason = decision
                    .reason
                    .unwrap_or_else(|| format!("quota exhausted for {tracked}"));
                warn!(provider = %tracked, "Request rejected by usage tracker: {}", reason);
                return Err(Error::quota_exceeded(reason));
            }
        }

        let providers = self.registry.providers_in_order();
        let mut last_error: Option<Error> = None;

        for (index, provider) in providers.iter().enumerate() {
            let name = provider.name();
            let breaker = self.breakers.get(name);
            let started = Instant::now();

            match breaker.execute(|| provider.generate(request)).await {
                Ok(response) => {
                    if self.tracked_provider.as_deref() == Some(name) {
                        self.usage.track_usage(name, response.tokens_used);
                    }
                    let latency_ms =
                        u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if index > 0 {
                        info!(provider = name, latency_ms, "Served by fallback provider");
                    } else {
                        debug!(provider = name, latency_ms, "Served by first provider");
                    }
                    return Ok(response.attributed_to(name, latency_ms));
                }
                Err(e) => {
                    let reason = classify_failure(&e);
                    let next = providers.get(index + 1).map(|p| p.name());
                    warn!(
                        provider = name,
                        next = next.unwrap_or("none"),
                        reason = %reason,
                        "Generation provider failed: {}",
                        e
                    );
                    let event = FailoverEvent::new(
                        RoutingOperation::Generation,
                        name,
                        next,
                        reason,
                        e.to_string(),
                    );
                    record_failover(self.audit.as_ref(), &event).await;
                    last_error = Some(e);
                }
            }
        }

        let message = match last_error {
            Some(e) => format!("last error: {e}"),
            None => "no generation providers configured".to_string(),
        };
        Err(Error::all_providers_failed(message))
    }

    /// Probe every provider's own availability check
    pub async fn provider_health(&self) -> Vec<ProviderHealthReport> {
        let probes = self.registry.providers_in_order().iter().map(|provider| async move {
            ProviderHealthReport {
                name: provider.name().to_string(),
                tier: provider.tier(),
                available: provider.is_available().await,
            }
        });
        join_all(probes).await
    }

    /// Breaker state per provider, in tier order
    pub async fn breaker_states(&self) -> Vec<(String, CircuitBreakerState)> {
        let mut states = Vec::with_capacity(self.registry.len());
        for provider in self.registry.providers_in_order() {
            let breaker = self.breakers.get(provider.name());
            states.push((provider.name().to_string(), breaker.state().await));
        }
        states
    }

    /// Providers this router evaluates
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Provider whose quota is enforced
    pub fn tracked_provider(&self) -> Option<&str> {
        self.tracked_provider.as_deref()
    }
}
