//! Usage tracker tests

use std::sync::Arc;
use std::time::Duration;

use relay_application::usage::{UsageConfig, UsageTracker};
use tokio_util::sync::CancellationToken;

use crate::test_utils::{ManualClock, date};

fn config(daily_requests: u64) -> UsageConfig {
    UsageConfig {
        enabled: true,
        tracked_provider: Some("X".into()),
        daily_request_limit: daily_requests,
        daily_token_limit: 1_000,
        requests_per_minute: 100,
        warning_ratio: 0.8,
    }
}

#[test]
fn test_disabled_tracker_always_allows() {
    let tracker = UsageTracker::new(UsageConfig {
        daily_request_limit: 1,
        requests_per_minute: 1,
        ..UsageConfig::disabled()
    });

    for _ in 0..5 {
        tracker.track_usage("X", 500);
        assert!(tracker.can_make_request("X").allowed);
    }
    assert!(tracker.usage_stats("X").is_none());
    assert_eq!(tracker.rpm_count(), 0);
}

#[test]
fn test_daily_request_limit_scenario() {
    let clock = Arc::new(ManualClock::new(date(2025, 6, 1)));
    let tracker = UsageTracker::with_clock(config(2), clock.clone());

    for _ in 0..2 {
        assert!(tracker.can_make_request("X").allowed);
        tracker.track_usage("X", 10);
    }

    let decision = tracker.can_make_request("X");
    assert!(!decision.allowed);
    assert!(decision.reason.unwrap_or_default().contains("Daily request limit"));
}

#[test]
fn test_limit_lifts_on_calendar_date_change() {
    let clock = Arc::new(ManualClock::new(date(2025, 6, 1)));
    let tracker = UsageTracker::with_clock(config(1), clock.clone());

    tracker.track_usage("X", 10);
    assert!(!tracker.can_make_request("X").allowed);

    clock.set(date(2025, 6, 2));
    assert!(tracker.can_make_request("X").allowed);

    let stats = tracker.usage_stats("X").expect("stats exist");
    assert_eq!(stats.request_count, 0);
    assert_eq!(stats.token_count, 0);
    assert_eq!(stats.last_reset, date(2025, 6, 2));
}

#[test]
fn test_token_limit() {
    let clock = Arc::new(ManualClock::new(date(2025, 6, 1)));
    let tracker = UsageTracker::with_clock(config(100), clock);

    tracker.track_usage("X", 1_000);
    let decision = tracker.can_make_request("X");
    assert!(!decision.allowed);
    assert!(decision.reason.unwrap_or_default().contains("Daily token limit"));
}

#[test]
fn test_rpm_limit_is_shared_across_providers() {
    let clock = Arc::new(ManualClock::new(date(2025, 6, 1)));
    let tracker = UsageTracker::with_clock(
        UsageConfig {
            requests_per_minute: 2,
            ..config(100)
        },
        clock,
    );

    tracker.track_usage("X", 1);
    tracker.track_usage("Y", 1);

    let decision = tracker.can_make_request("Z");
    assert!(!decision.allowed);
    assert!(decision.reason.unwrap_or_default().contains("per minute"));

    tracker.reset_rpm_window();
    assert!(tracker.can_make_request("Z").allowed);
}

#[test]
fn test_counters_are_per_provider() {
    let clock = Arc::new(ManualClock::new(date(2025, 6, 1)));
    let tracker = UsageTracker::with_clock(config(1), clock);

    tracker.track_usage("X", 10);
    assert!(!tracker.can_make_request("X").allowed);
    assert!(tracker.can_make_request("Y").allowed);
}

#[tokio::test(start_paused = true)]
async fn test_rpm_window_resets_every_minute_until_cancelled() {
    let clock = Arc::new(ManualClock::new(date(2025, 6, 1)));
    let tracker = Arc::new(UsageTracker::with_clock(config(100), clock));
    let shutdown = CancellationToken::new();
    let task = tracker.start_rpm_reset(shutdown.clone());

    tracker.track_usage("X", 1);
    tracker.track_usage("X", 1);
    assert_eq!(tracker.rpm_count(), 2);

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(tracker.rpm_count(), 0);

    shutdown.cancel();
    task.await.expect("reset task should stop cleanly");

    tracker.track_usage("X", 1);
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(tracker.rpm_count(), 1);
}
