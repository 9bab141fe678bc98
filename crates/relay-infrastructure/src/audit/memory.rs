//! Bounded in-process audit buffer

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use relay_domain::error::{Error, Result};
use relay_domain::ports::infrastructure::AuditSink;
use relay_domain::value_objects::FailoverEvent;

/// Keeps the most recent `capacity` events, dropping the oldest first
#[derive(Debug)]
pub struct InMemoryAuditSink {
    capacity: usize,
    events: Mutex<VecDeque<FailoverEvent>>,
}

impl InMemoryAuditSink {
    /// Create a buffer holding at most `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            events: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Retained events, oldest first
    pub fn events(&self) -> Vec<FailoverEvent> {
        self.events
            .lock()
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    /// Whether nothing has been retained
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn append(&self, event: &FailoverEvent) -> Result<()> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| Error::internal("audit buffer lock poisoned"))?;
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "memory"
    }
}
