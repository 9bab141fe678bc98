//! Audit sink appending one JSON object per line to a file

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use relay_domain::error::Result;
use relay_domain::ports::infrastructure::AuditSink;
use relay_domain::value_objects::FailoverEvent;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error_ext::ErrorContext;

/// JSON Lines audit log
///
/// The file and its parent directories are created on first append. Writes
/// are serialized so concurrent routers never interleave lines.
#[derive(Debug)]
pub struct JsonlAuditSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlAuditSink {
    /// Append events to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Output file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditSink for JsonlAuditSink {
    async fn append(&self, event: &FailoverEvent) -> Result<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .io_context(format!("Failed to create {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .io_context(format!("Failed to open audit log {}", self.path.display()))?;
        file.write_all(&line)
            .await
            .io_context("Failed to write audit event")?;
        file.flush().await.io_context("Failed to flush audit log")?;
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "jsonl"
    }
}
