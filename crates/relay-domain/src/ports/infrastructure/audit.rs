//! Failover Audit Port
//!
//! Sink for [`FailoverEvent`] records. Routers treat a failing sink as an
//! observability problem only: the error is logged and the request goes on.

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::FailoverEvent;

/// Append-only destination for failover events
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist one event
    async fn append(&self, event: &FailoverEvent) -> Result<()>;

    /// Name used in logs
    fn sink_name(&self) -> &str;
}
