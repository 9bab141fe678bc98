//! Audit sink that writes each failover as a structured log line

use async_trait::async_trait;
use relay_domain::error::Result;
use relay_domain::ports::infrastructure::AuditSink;
use relay_domain::value_objects::FailoverEvent;
use tracing::warn;

use crate::constants::AUDIT_LOG_TARGET;

/// Logs failover events under the `relay::failover` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    /// Create a tracing sink
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn append(&self, event: &FailoverEvent) -> Result<()> {
        warn!(
            target: AUDIT_LOG_TARGET,
            operation = ?event.operation,
            failed = %event.failed_provider,
            next = %event.successful_provider,
            reason = %event.reason,
            error = %event.error_message,
            "Provider failover"
        );
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "tracing"
    }
}
