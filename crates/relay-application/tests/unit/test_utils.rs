//! Test doubles for the routing ports

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use relay_domain::ports::infrastructure::{AuditSink, Clock};
use relay_domain::ports::providers::{EmbeddingProvider, GenerationProvider};
use relay_domain::value_objects::{
    Embedding, FailoverEvent, GenerateRequest, GenerateResponse, ProviderTier,
};
use relay_domain::{Error, Result};

/// What a mock provider does when called
#[derive(Debug, Clone)]
pub enum Behavior {
    Succeed,
    Fail(String),
    FailStatus(u16),
    Hang,
}

pub struct MockGenerationProvider {
    name: String,
    tier: ProviderTier,
    behavior: Mutex<Behavior>,
    calls: AtomicU32,
    available: bool,
    tokens: u64,
}

impl MockGenerationProvider {
    pub fn new(name: &str, tier: ProviderTier) -> Self {
        Self {
            name: name.to_string(),
            tier,
            behavior: Mutex::new(Behavior::Succeed),
            calls: AtomicU32::new(0),
            available: true,
            tokens: 10,
        }
    }

    pub fn failing(name: &str, tier: ProviderTier, message: &str) -> Self {
        Self::new(name, tier).with_behavior(Behavior::Fail(message.to_string()))
    }

    pub fn with_behavior(self, behavior: Behavior) -> Self {
        *self.behavior.lock().expect("behavior lock") = behavior;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.lock().expect("behavior lock") = behavior;
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().expect("behavior lock").clone();
        match behavior {
            Behavior::Succeed => Ok(GenerateResponse::new(
                format!(
                    "{} says: {}",
                    self.name,
                    request.last_user_message().unwrap_or_default()
                ),
                "mock-model",
                self.tokens,
            )),
            Behavior::Fail(message) => Err(Error::provider(&self.name, message)),
            Behavior::FailStatus(status) => {
                Err(Error::provider_status(&self.name, status, "upstream error"))
            }
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(Error::provider(&self.name, "woke up"))
            }
        }
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> ProviderTier {
        self.tier
    }
}

pub struct MockEmbeddingProvider {
    name: String,
    dimensions: usize,
    behavior: Mutex<Behavior>,
    calls: AtomicU32,
}

impl MockEmbeddingProvider {
    pub fn new(name: &str, dimensions: usize) -> Self {
        Self {
            name: name.to_string(),
            dimensions,
            behavior: Mutex::new(Behavior::Succeed),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing(name: &str, dimensions: usize, message: &str) -> Self {
        let provider = Self::new(name, dimensions);
        provider.set_behavior(Behavior::Fail(message.to_string()));
        provider
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.lock().expect("behavior lock") = behavior;
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().expect("behavior lock").clone();
        match behavior {
            Behavior::Succeed => Ok(texts
                .iter()
                .map(|_| Embedding::new(vec![0.5; self.dimensions], &self.name))
                .collect()),
            Behavior::Fail(message) => Err(Error::embedding(message)),
            Behavior::FailStatus(status) => {
                Err(Error::provider_status(&self.name, status, "upstream error"))
            }
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(Error::embedding("woke up"))
            }
        }
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

#[derive(Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<FailoverEvent>>,
}

impl RecordingAuditSink {
    pub fn events(&self) -> Vec<FailoverEvent> {
        self.events.lock().expect("events lock").clone()
    }

    /// (failed, successful) pairs in recording order
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .map(|e| (e.failed_provider, e.successful_provider))
            .collect()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn append(&self, event: &FailoverEvent) -> Result<()> {
        self.events.lock().expect("events lock").push(event.clone());
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "recording"
    }
}

pub struct BrokenAuditSink;

#[async_trait]
impl AuditSink for BrokenAuditSink {
    async fn append(&self, _event: &FailoverEvent) -> Result<()> {
        Err(Error::io("audit log unavailable"))
    }

    fn sink_name(&self) -> &str {
        "broken"
    }
}

pub struct ManualClock {
    today: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().expect("clock lock") = today;
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().expect("clock lock")
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
