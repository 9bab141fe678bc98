//! Failover audit sinks
//!
//! | Sink | Destination |
//! |------|-------------|
//! | [`TracingAuditSink`] | structured log line |
//! | [`JsonlAuditSink`] | JSON Lines file |
//! | [`InMemoryAuditSink`] | bounded buffer |
//! | [`NullAuditSink`] | nowhere |

use std::sync::Arc;

use relay_domain::error::{Error, Result};
use relay_domain::ports::infrastructure::AuditSink;

use crate::config::{AuditConfig, AuditSinkKind};

pub mod jsonl;
pub mod log;
pub mod memory;
pub mod null;

pub use jsonl::JsonlAuditSink;
pub use log::TracingAuditSink;
pub use memory::InMemoryAuditSink;
pub use null::NullAuditSink;

/// Build the sink selected by `config`
pub fn create_audit_sink(config: &AuditConfig) -> Result<Arc<dyn AuditSink>> {
    let sink: Arc<dyn AuditSink> = match config.sink {
        AuditSinkKind::Tracing => Arc::new(TracingAuditSink::new()),
        AuditSinkKind::Jsonl => {
            let path = config
                .path
                .clone()
                .ok_or_else(|| Error::configuration("Audit path is required for the jsonl sink"))?;
            Arc::new(JsonlAuditSink::new(path))
        }
        AuditSinkKind::Memory => Arc::new(InMemoryAuditSink::new(config.capacity)),
        AuditSinkKind::Null => Arc::new(NullAuditSink),
    };
    Ok(sink)
}
