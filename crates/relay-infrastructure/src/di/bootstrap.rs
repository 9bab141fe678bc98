//! Composition root
//!
//! Builds every runtime component from an [`AppConfig`]:
//!
//! ```text
//! AppConfig → resolvers → ProviderRegistry / EmbeddingProviderSet
//!           → breakers, usage tracker, audit sink → routers
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?).await?;
//! let response = context.generation().generate(&request).await?;
//! context.shutdown().await;
//! ```

use std::sync::Arc;

use relay_application::resilience::CircuitBreakerRegistry;
use relay_application::routing::{EmbeddingRouter, GenerationRouter};
use relay_application::usage::UsageTracker;
use relay_domain::error::Result;
use relay_domain::ports::infrastructure::AuditSink;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::audit::create_audit_sink;
use crate::config::AppConfig;
use crate::config::loader::validate_app_config;
use crate::di::resolver::{resolve_embedding_providers, resolve_generation_providers};

/// Application context holding the routers and their shared services
pub struct AppContext {
    config: Arc<AppConfig>,
    generation: Arc<GenerationRouter>,
    embedding: Arc<EmbeddingRouter>,
    breakers: Arc<CircuitBreakerRegistry>,
    usage: Arc<UsageTracker>,
    audit: Arc<dyn AuditSink>,
    shutdown: CancellationToken,
    background: Vec<JoinHandle<()>>,
}

impl AppContext {
    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Generation router
    pub fn generation(&self) -> Arc<GenerationRouter> {
        Arc::clone(&self.generation)
    }

    /// Embedding router
    pub fn embedding(&self) -> Arc<EmbeddingRouter> {
        Arc::clone(&self.embedding)
    }

    /// Circuit breakers keyed by generation provider name
    pub fn breakers(&self) -> Arc<CircuitBreakerRegistry> {
        Arc::clone(&self.breakers)
    }

    /// Usage tracker
    pub fn usage(&self) -> Arc<UsageTracker> {
        Arc::clone(&self.usage)
    }

    /// Failover audit sink
    pub fn audit(&self) -> Arc<dyn AuditSink> {
        Arc::clone(&self.audit)
    }

    /// Stop background tasks and wait for them to finish
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for handle in self.background {
            if let Err(e) = handle.await {
                warn!(error = %e, "Background task ended abnormally");
            }
        }
        info!("Relay shut down");
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("generation", &self.generation.registry())
            .field("embedding", self.embedding.providers())
            .field("audit", &self.audit.sink_name())
            .finish_non_exhaustive()
    }
}

/// Build the application context
///
/// Must run inside a Tokio runtime: breakers and the per-minute reset task
/// are spawned here.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    validate_app_config(&config)?;

    let registry = resolve_generation_providers(&config.providers.generation)?;
    let embedding_set = resolve_embedding_providers(&config.providers.embedding)?;
    let audit = create_audit_sink(&config.audit)?;

    let breakers = Arc::new(CircuitBreakerRegistry::new(
        config.resilience.breaker_config(),
    ));
    let usage = Arc::new(UsageTracker::new(config.usage.clone()));

    let shutdown = CancellationToken::new();
    let mut background = Vec::new();
    if config.usage.enabled {
        background.push(usage.start_rpm_reset(shutdown.child_token()));
    }

    let generation = Arc::new(GenerationRouter::new(
        registry,
        Arc::clone(&breakers),
        Arc::clone(&usage),
        Arc::clone(&audit),
    ));
    let embedding = Arc::new(EmbeddingRouter::with_failure_threshold(
        embedding_set,
        Arc::clone(&audit),
        config.providers.embedding.failure_threshold,
    ));

    info!(
        generation = ?generation.registry().names(),
        embedding = ?embedding.providers().names(),
        audit = audit.sink_name(),
        "Relay initialized"
    );

    Ok(AppContext {
        config: Arc::new(config),
        generation,
        embedding,
        breakers,
        usage,
        audit,
        shutdown,
        background,
    })
}
