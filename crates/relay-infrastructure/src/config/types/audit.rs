//! Audit sink configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::AUDIT_MEMORY_DEFAULT_CAPACITY;

/// Where failover events are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditSinkKind {
    /// Structured log line per event
    #[default]
    Tracing,
    /// One JSON object per line in `path`
    Jsonl,
    /// Bounded in-process buffer
    Memory,
    /// Discard events
    Null,
}

/// Audit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Sink kind
    pub sink: AuditSinkKind,
    /// Output file for the `jsonl` sink
    pub path: Option<PathBuf>,
    /// Events retained by the `memory` sink
    pub capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            sink: AuditSinkKind::Tracing,
            path: None,
            capacity: AUDIT_MEMORY_DEFAULT_CAPACITY,
        }
    }
}
