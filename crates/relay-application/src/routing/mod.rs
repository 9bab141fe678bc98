//! Request routing
//!
//! - [`generation`] - tiered generation failover behind circuit breakers
//! - [`embedding`] - ordered embedding failover with failure-count disablement
//! - [`classify`] - failure reason taxonomy for logs and audit records

pub mod classify;
pub mod embedding;
pub mod generation;

use relay_domain::ports::infrastructure::AuditSink;
use relay_domain::value_objects::FailoverEvent;
use tracing::warn;

pub use classify::{classify_failure, classify_message};
pub use embedding::{EmbeddingFailureTracker, EmbeddingRouter};
pub use generation::GenerationRouter;

/// Write `event` to `sink`; a sink error is logged and dropped
pub(crate) async fn record_failover(sink: &dyn AuditSink, event: &FailoverEvent) {
    if let Err(e) = sink.append(event).await {
        warn!(
            sink = sink.sink_name(),
            failed_provider = %event.failed_provider,
            "Failed to record failover event: {}",
            e
        );
    }
}
