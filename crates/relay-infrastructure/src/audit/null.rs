//! Audit sink that discards every event

use async_trait::async_trait;
use relay_domain::error::Result;
use relay_domain::ports::infrastructure::AuditSink;
use relay_domain::value_objects::FailoverEvent;

/// Discards events
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAuditSink;

#[async_trait]
impl AuditSink for NullAuditSink {
    async fn append(&self, _event: &FailoverEvent) -> Result<()> {
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "null"
    }
}
