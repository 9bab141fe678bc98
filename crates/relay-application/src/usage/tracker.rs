//! Usage/Rate Tracker
//!
//! Daily request and token counters per provider plus a shared
//! requests-per-minute window. Counters for a provider are mutated under
//! that provider's map entry lock; the minute counter is a plain atomic
//! zeroed by a background task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use relay_domain::constants::USAGE_RPM_WINDOW_SECS;
use relay_domain::ports::infrastructure::{Clock, SystemClock};
use relay_domain::value_objects::{QuotaDecision, UsageStats};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::UsageConfig;

/// Quota gate consulted before any generation attempt
pub struct UsageTracker {
    config: UsageConfig,
    clock: Arc<dyn Clock>,
    stats: DashMap<String, UsageStats>,
    rpm_counter: AtomicU64,
}

impl UsageTracker {
    /// Create a tracker reading dates from the local system clock
    pub fn new(config: UsageConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a tracker with an explicit date source
    pub fn with_clock(config: UsageConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            stats: DashMap::new(),
            rpm_counter: AtomicU64::new(0),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &UsageConfig {
        &self.config
    }

    /// Whether `provider` may take another request right now
    pub fn can_make_request(&self, provider: &str) -> QuotaDecision {
        if !self.config.enabled {
            return QuotaDecision::allow();
        }

        let rpm = self.rpm_counter.load(Ordering::SeqCst);
        if rpm >= self.config.requests_per_minute {
            return QuotaDecision::deny(format!(
                "Requests per minute limit reached ({rpm}/{})",
                self.config.requests_per_minute
            ));
        }

        let today = self.clock.today();
        let mut stats = self
            .stats
            .entry(provider.to_string())
            .or_insert_with(|| UsageStats::new(today));
        if stats.roll_over(today) {
            info!(provider, "Daily usage counters reset for {}", today);
        }

        if stats.request_count >= self.config.daily_request_limit {
            return QuotaDecision::deny(format!(
                "Daily request limit reached ({}/{})",
                stats.request_count, self.config.daily_request_limit
            ));
        }
        if stats.token_count >= self.config.daily_token_limit {
            return QuotaDecision::deny(format!(
                "Daily token limit reached ({}/{})",
                stats.token_count, self.config.daily_token_limit
            ));
        }

        QuotaDecision::allow()
    }

    /// Account one successful request that consumed `tokens`
    pub fn track_usage(&self, provider: &str, tokens: u64) {
        if !self.config.enabled {
            return;
        }

        let today = self.clock.today();
        let mut stats = self
            .stats
            .entry(provider.to_string())
            .or_insert_with(|| UsageStats::new(today));
        stats.roll_over(today);

        let previous_requests = stats.request_count;
        let previous_tokens = stats.token_count;
        stats.request_count += 1;
        stats.token_count = stats.token_count.saturating_add(tokens);
        self.rpm_counter.fetch_add(1, Ordering::SeqCst);

        if self.crosses_warning(
            previous_requests,
            stats.request_count,
            self.config.daily_request_limit,
        ) {
            warn!(
                provider,
                used = stats.request_count,
                limit = self.config.daily_request_limit,
                "Daily request usage above {:.0}% of limit",
                self.config.warning_ratio * 100.0
            );
        }
        if self.crosses_warning(
            previous_tokens,
            stats.token_count,
            self.config.daily_token_limit,
        ) {
            warn!(
                provider,
                used = stats.token_count,
                limit = self.config.daily_token_limit,
                "Daily token usage above {:.0}% of limit",
                self.config.warning_ratio * 100.0
            );
        }

        debug!(
            provider,
            requests = stats.request_count,
            tokens = stats.token_count,
            "Usage tracked"
        );
    }

    /// Today's counters for `provider`, if it has been seen
    pub fn usage_stats(&self, provider: &str) -> Option<UsageStats> {
        self.stats.get(provider).map(|s| s.value().clone())
    }

    /// Requests counted in the current minute window
    pub fn rpm_count(&self) -> u64 {
        self.rpm_counter.load(Ordering::SeqCst)
    }

    /// Start a new minute window
    pub fn reset_rpm_window(&self) {
        self.rpm_counter.store(0, Ordering::SeqCst);
    }

    /// Spawn the task that zeroes the minute counter every 60 seconds
    ///
    /// The task stops when `shutdown` is cancelled or the tracker is dropped.
    pub fn start_rpm_reset(self: &Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        let tracker: Weak<Self> = Arc::downgrade(self);
        let period = Duration::from_secs(USAGE_RPM_WINDOW_SECS);

        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    () = shutdown.cancelled() => {
                        debug!("RPM reset task stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        let Some(tracker) = tracker.upgrade() else { break };
                        tracker.reset_rpm_window();
                    }
                }
            }
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn crosses_warning(&self, before: u64, after: u64, limit: u64) -> bool {
        let threshold = limit as f64 * self.config.warning_ratio;
        (before as f64) < threshold && (after as f64) >= threshold
    }
}
