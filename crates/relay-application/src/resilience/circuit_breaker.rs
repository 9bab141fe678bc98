//! Circuit Breaker Module
//!
//! Per-provider circuit breakers built on the Actor pattern: each breaker owns
//! a Tokio task that holds its state, so every read-then-write sequence is
//! serialized without locks. Callers talk to it over an mpsc channel.
//!
//! ```text
//! CLOSED --(failure_threshold consecutive failures)--> OPEN
//! OPEN   --(reset_timeout elapsed, checked at call time)--> HALF_OPEN
//! HALF_OPEN --(success_threshold successes)--> CLOSED
//! HALF_OPEN --(any failure)--> OPEN
//! ```
//!
//! An admitted call whose future is dropped before it finishes hands its
//! half-open slot back without counting as a success or a failure.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use relay_domain::constants::{
    CIRCUIT_BREAKER_CALL_TIMEOUT_SECS, CIRCUIT_BREAKER_FAILURE_THRESHOLD,
    CIRCUIT_BREAKER_RESET_TIMEOUT_SECS, CIRCUIT_BREAKER_SUCCESS_THRESHOLD,
};
use relay_domain::error::{Error, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitBreakerState {
    /// Circuit is closed, requests flow normally
    Closed,
    /// Circuit is open, requests are blocked
    Open {
        /// When the breaker tripped
        opened_at: Instant,
    },
    /// Circuit is half-open, testing if service recovered
    HalfOpen,
}

impl std::fmt::Display for CircuitBreakerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitBreakerState::Closed => write!(f, "closed"),
            CircuitBreakerState::Open { .. } => write!(f, "open"),
            CircuitBreakerState::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Circuit breaker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Consecutive half-open successes needed to close the circuit
    pub success_threshold: u32,
    /// Deadline for a single guarded call
    pub call_timeout: Duration,
    /// Time to wait in OPEN before admitting a probe
    pub reset_timeout: Duration,
    /// Maximum probes in flight while HALF_OPEN
    pub half_open_max_requests: u32,
}

impl CircuitBreakerConfig {
    /// Create a configuration; the half-open probe bound follows `success_threshold`
    pub fn new(
        failure_threshold: u32,
        success_threshold: u32,
        call_timeout: Duration,
        reset_timeout: Duration,
    ) -> Self {
        Self {
            failure_threshold,
            success_threshold,
            call_timeout,
            reset_timeout,
            half_open_max_requests: success_threshold,
        }
    }

    /// Override the half-open probe bound
    #[must_use]
    pub fn with_half_open_max_requests(mut self, max_requests: u32) -> Self {
        self.half_open_max_requests = max_requests;
        self
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self::new(
            CIRCUIT_BREAKER_FAILURE_THRESHOLD,
            CIRCUIT_BREAKER_SUCCESS_THRESHOLD,
            Duration::from_secs(CIRCUIT_BREAKER_CALL_TIMEOUT_SECS),
            Duration::from_secs(CIRCUIT_BREAKER_RESET_TIMEOUT_SECS),
        )
    }
}

/// Circuit breaker metrics
#[derive(Debug, Clone, Default)]
pub struct CircuitBreakerMetrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub rejected_requests: u64,
    pub consecutive_failures: u32,
    pub consecutive_successes: u32,
    pub circuit_opened_count: u32,
    pub circuit_closed_count: u32,
    pub last_failure: Option<Instant>,
    pub last_success: Option<Instant>,
}

/// Messages for the circuit breaker actor
enum CBMessage {
    /// Reply carries the half-open epoch the call was admitted in
    CanCall(oneshot::Sender<Option<u64>>),
    OnSuccess,
    OnFailure(Instant),
    Cancelled(u64),
    GetState(oneshot::Sender<CircuitBreakerState>),
    GetMetrics(oneshot::Sender<CircuitBreakerMetrics>),
}

/// Circuit breaker handle
///
/// Cheap to share behind an `Arc`; the state lives in the actor task, which
/// stops once every handle is dropped. Must be created inside a Tokio runtime.
pub struct CircuitBreaker {
    id: String,
    call_timeout: Duration,
    sender: mpsc::Sender<CBMessage>,
}

impl CircuitBreaker {
    /// Create a breaker with default thresholds
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_config(id, CircuitBreakerConfig::default())
    }

    /// Create a breaker and spawn its actor
    pub fn with_config(id: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        let id = id.into();
        let (tx, rx) = mpsc::channel(100);
        let call_timeout = config.call_timeout;

        let mut actor = CircuitBreakerActor::new(id.clone(), rx, config);
        tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            id,
            call_timeout,
            sender: tx,
        }
    }

    /// Key this breaker guards
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Run `operation` through the breaker.
    ///
    /// Rejected calls return [`Error::CircuitOpen`] without invoking the
    /// operation. Calls exceeding the configured deadline count as failures and
    /// return [`Error::Timeout`]. Any other error is recorded and returned as is.
    #[instrument(skip(self, operation), fields(id = %self.id))]
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let Some(epoch) = self.can_call().await else {
            debug!("Circuit breaker {} rejected call", self.id);
            return Err(Error::circuit_open(&self.id));
        };
        let mut admission = Admission::new(&self.sender, epoch);

        let outcome = tokio::time::timeout(self.call_timeout, operation()).await;
        let finished_at = Instant::now();
        match outcome {
            Ok(Ok(value)) => {
                self.on_success().await;
                admission.settle();
                Ok(value)
            }
            Ok(Err(e)) => {
                self.on_failure(finished_at).await;
                admission.settle();
                Err(e)
            }
            Err(_) => {
                self.on_failure(finished_at).await;
                admission.settle();
                Err(Error::timeout(
                    format!("call to {}", self.id),
                    self.call_timeout,
                ))
            }
        }
    }

    /// Current state, after applying any due OPEN to HALF_OPEN promotion
    pub async fn state(&self) -> CircuitBreakerState {
        let (tx, rx) = oneshot::channel();
        let _ = self.sender.send(CBMessage::GetState(tx)).await;
        rx.await.unwrap_or(CircuitBreakerState::Closed)
    }

    /// Snapshot of the counters
    pub async fn metrics(&self) -> CircuitBreakerMetrics {
        let (tx, rx) = oneshot::channel();
        let _ = self.sender.send(CBMessage::GetMetrics(tx)).await;
        rx.await.unwrap_or_default()
    }

    async fn can_call(&self) -> Option<u64> {
        let (tx, rx) = oneshot::channel();
        let _ = self.sender.send(CBMessage::CanCall(tx)).await;
        rx.await.ok().flatten()
    }

    async fn on_success(&self) {
        let _ = self.sender.send(CBMessage::OnSuccess).await;
    }

    async fn on_failure(&self, at: Instant) {
        let _ = self.sender.send(CBMessage::OnFailure(at)).await;
    }
}

/// Admitted call whose outcome has not reached the actor yet
///
/// Dropping it unsettled sends [`CBMessage::Cancelled`] so a half-open slot
/// is never leaked by a caller that gives up on `execute`.
struct Admission<'a> {
    sender: &'a mpsc::Sender<CBMessage>,
    epoch: u64,
    settled: bool,
}

impl<'a> Admission<'a> {
    fn new(sender: &'a mpsc::Sender<CBMessage>, epoch: u64) -> Self {
        Self {
            sender,
            epoch,
            settled: false,
        }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        match self.sender.try_send(CBMessage::Cancelled(self.epoch)) {
            Ok(()) | Err(mpsc::error::TrySendError::Closed(_)) => {}
            Err(mpsc::error::TrySendError::Full(msg)) => {
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    let sender = self.sender.clone();
                    handle.spawn(async move {
                        let _ = sender.send(msg).await;
                    });
                }
            }
        }
    }
}

struct CircuitBreakerActor {
    id: String,
    receiver: mpsc::Receiver<CBMessage>,
    config: CircuitBreakerConfig,
    state: CircuitBreakerState,
    metrics: CircuitBreakerMetrics,
    half_open_in_flight: u32,
    half_open_epoch: u64,
}

impl CircuitBreakerActor {
    fn new(id: String, receiver: mpsc::Receiver<CBMessage>, config: CircuitBreakerConfig) -> Self {
        Self {
            id,
            receiver,
            config,
            state: CircuitBreakerState::Closed,
            metrics: CircuitBreakerMetrics::default(),
            half_open_in_flight: 0,
            half_open_epoch: 0,
        }
    }

    async fn run(&mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CBMessage::CanCall(tx) => {
                    let admitted = self.admit();
                    // Caller went away before hearing back
                    if let Err(Some(epoch)) = tx.send(admitted) {
                        self.release(epoch);
                    }
                }
                CBMessage::OnSuccess => self.record_success(),
                CBMessage::OnFailure(at) => self.record_failure(at),
                CBMessage::Cancelled(epoch) => self.release(epoch),
                CBMessage::GetState(tx) => {
                    self.check_state_transition();
                    let _ = tx.send(self.state);
                }
                CBMessage::GetMetrics(tx) => {
                    let _ = tx.send(self.metrics.clone());
                }
            }
        }
    }

    fn admit(&mut self) -> Option<u64> {
        self.check_state_transition();
        let can = match self.state {
            CircuitBreakerState::Closed => true,
            CircuitBreakerState::Open { .. } => false,
            CircuitBreakerState::HalfOpen => {
                if self.half_open_in_flight < self.config.half_open_max_requests {
                    self.half_open_in_flight += 1;
                    true
                } else {
                    false
                }
            }
        };
        if !can {
            self.metrics.rejected_requests += 1;
            return None;
        }
        Some(self.half_open_epoch)
    }

    fn release(&mut self, epoch: u64) {
        if self.state == CircuitBreakerState::HalfOpen && epoch == self.half_open_epoch {
            self.half_open_in_flight = self.half_open_in_flight.saturating_sub(1);
            debug!(
                in_flight = self.half_open_in_flight,
                "Circuit breaker {} released a cancelled probe", self.id
            );
        }
    }

    fn record_success(&mut self) {
        self.metrics.total_requests += 1;
        self.metrics.successful_requests += 1;
        self.metrics.consecutive_failures = 0;
        self.metrics.last_success = Some(Instant::now());

        if self.state == CircuitBreakerState::HalfOpen {
            self.half_open_in_flight = self.half_open_in_flight.saturating_sub(1);
            self.metrics.consecutive_successes += 1;
            if self.metrics.consecutive_successes >= self.config.success_threshold {
                info!("Circuit breaker {} transitioning to Closed", self.id);
                self.state = CircuitBreakerState::Closed;
                self.metrics.consecutive_successes = 0;
                self.half_open_in_flight = 0;
                self.metrics.circuit_closed_count += 1;
            }
        }
    }

    fn record_failure(&mut self, at: Instant) {
        self.metrics.total_requests += 1;
        self.metrics.failed_requests += 1;
        self.metrics.consecutive_failures += 1;
        self.metrics.last_failure = Some(at);

        match self.state {
            CircuitBreakerState::Closed => {
                if self.metrics.consecutive_failures >= self.config.failure_threshold {
                    warn!(
                        failures = self.metrics.consecutive_failures,
                        "Circuit breaker {} transitioning to Open", self.id
                    );
                    self.trip(at);
                }
            }
            CircuitBreakerState::HalfOpen => {
                warn!(
                    "Circuit breaker {} failing in Half-Open, transitioning back to Open",
                    self.id
                );
                self.trip(at);
            }
            CircuitBreakerState::Open { .. } => {}
        }
    }

    fn trip(&mut self, opened_at: Instant) {
        self.state = CircuitBreakerState::Open { opened_at };
        self.metrics.consecutive_successes = 0;
        self.half_open_in_flight = 0;
        self.metrics.circuit_opened_count += 1;
    }

    fn check_state_transition(&mut self) {
        if let CircuitBreakerState::Open { opened_at } = self.state {
            if opened_at.elapsed() >= self.config.reset_timeout {
                info!("Circuit breaker {} transitioning to Half-Open", self.id);
                self.state = CircuitBreakerState::HalfOpen;
                self.metrics.consecutive_successes = 0;
                self.half_open_in_flight = 0;
                self.half_open_epoch += 1;
            }
        }
    }
}

/// Breakers keyed by provider name, created on first use
pub struct CircuitBreakerRegistry {
    config: CircuitBreakerConfig,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
}

impl CircuitBreakerRegistry {
    /// Create an empty registry; every breaker gets `config`
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            breakers: DashMap::new(),
        }
    }

    /// Breaker for `key`, creating it if needed
    pub fn get(&self, key: &str) -> Arc<CircuitBreaker> {
        if let Some(existing) = self.breakers.get(key) {
            return Arc::clone(existing.value());
        }
        let entry = self.breakers.entry(key.to_string()).or_insert_with(|| {
            debug!("Creating circuit breaker for {}", key);
            Arc::new(CircuitBreaker::with_config(key, self.config.clone()))
        });
        Arc::clone(entry.value())
    }

    /// Configuration applied to new breakers
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Number of breakers created so far
    pub fn len(&self) -> usize {
        self.breakers.len()
    }

    /// Whether no breaker has been created yet
    pub fn is_empty(&self) -> bool {
        self.breakers.is_empty()
    }
}

impl Default for CircuitBreakerRegistry {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}
