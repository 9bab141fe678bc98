//! Generation router tests

use std::sync::Arc;
use std::time::Duration;

use relay_application::registry::ProviderRegistry;
use relay_application::resilience::{CircuitBreakerConfig, CircuitBreakerRegistry, CircuitBreakerState};
use relay_application::routing::GenerationRouter;
use relay_application::usage::{UsageConfig, UsageTracker};
use relay_domain::Error;
use relay_domain::ports::infrastructure::AuditSink;
use relay_domain::ports::providers::GenerationProvider;
use relay_domain::value_objects::{ChatMessage, FailureReason, GenerateRequest, ProviderTier};

use crate::test_utils::{
    Behavior, BrokenAuditSink, ManualClock, MockGenerationProvider, RecordingAuditSink, date,
};

struct Harness {
    router: GenerationRouter,
    audit: Arc<RecordingAuditSink>,
}

fn harness(providers: &[Arc<MockGenerationProvider>], usage: UsageConfig) -> Harness {
    harness_with(providers, usage, CircuitBreakerConfig::default())
}

fn harness_with(
    providers: &[Arc<MockGenerationProvider>],
    usage: UsageConfig,
    breaker: CircuitBreakerConfig,
) -> Harness {
    let audit = Arc::new(RecordingAuditSink::default());
    let registry = ProviderRegistry::new(
        providers
            .iter()
            .map(|p| Arc::clone(p) as Arc<dyn GenerationProvider>)
            .collect(),
    );
    let clock = Arc::new(ManualClock::new(date(2025, 6, 1)));
    let router = GenerationRouter::new(
        registry,
        Arc::new(CircuitBreakerRegistry::new(breaker)),
        Arc::new(UsageTracker::with_clock(usage, clock)),
        Arc::clone(&audit) as Arc<dyn AuditSink>,
    );
    Harness { router, audit }
}

fn request() -> GenerateRequest {
    GenerateRequest::new("be brief").with_message(ChatMessage::user("hello"))
}

fn provider(name: &str, tier: ProviderTier) -> Arc<MockGenerationProvider> {
    Arc::new(MockGenerationProvider::new(name, tier))
}

fn failing(name: &str, tier: ProviderTier) -> Arc<MockGenerationProvider> {
    Arc::new(MockGenerationProvider::failing(name, tier, "connection refused"))
}

#[tokio::test]
async fn test_first_success_records_no_event() {
    let a = provider("a", ProviderTier::Primary);
    let b = provider("b", ProviderTier::Fallback);
    let h = harness(&[a.clone(), b.clone()], UsageConfig::disabled());

    let response = h.router.generate(&request()).await.expect("should succeed");

    assert_eq!(response.model_used, "a");
    assert_eq!(response.text, "a says: hello");
    assert!(h.audit.events().is_empty());
    assert_eq!(b.calls(), 0);
}

#[tokio::test]
async fn test_each_failure_records_an_event_naming_the_next_provider() {
    let a = failing("a", ProviderTier::Primary);
    let b = failing("b", ProviderTier::Fallback);
    let c = provider("c", ProviderTier::Local);
    let h = harness(&[a, b, c], UsageConfig::disabled());

    let response = h.router.generate(&request()).await.expect("should succeed");

    assert_eq!(response.model_used, "c");
    assert_eq!(
        h.audit.pairs(),
        [
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "c".to_string())
        ]
    );
    assert!(
        h.audit
            .events()
            .iter()
            .all(|e| e.reason == FailureReason::ConnectionRefused)
    );
}

#[tokio::test]
async fn test_all_failing_raises_aggregate_with_last_error() {
    let a = failing("a", ProviderTier::Primary);
    let b = Arc::new(MockGenerationProvider::failing(
        "b",
        ProviderTier::Local,
        "model not loaded",
    ));
    let h = harness(&[a, b], UsageConfig::disabled());

    let err = h.router.generate(&request()).await.expect_err("should fail");

    match err {
        Error::AllProvidersFailed { message } => assert!(message.contains("model not loaded")),
        other => panic!("unexpected error: {other}"),
    }
    let events = h.audit.events();
    assert_eq!(events.len(), 2);
    assert!(events[1].is_terminal());
}

#[tokio::test]
async fn test_providers_are_tried_in_tier_order() {
    let local = provider("local", ProviderTier::Local);
    let primary = failing("primary", ProviderTier::Primary);
    let h = harness(&[local.clone(), primary.clone()], UsageConfig::disabled());

    let response = h.router.generate(&request()).await.expect("should succeed");

    assert_eq!(response.model_used, "local");
    assert_eq!(primary.calls(), 1);
    assert_eq!(h.audit.pairs(), [("primary".to_string(), "local".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_fails_over_to_next_provider() {
    let a = Arc::new(MockGenerationProvider::new("A", ProviderTier::Primary).with_behavior(Behavior::Hang));
    let b = provider("B", ProviderTier::Fallback);
    let breaker = CircuitBreakerConfig::new(5, 2, Duration::from_secs(1), Duration::from_secs(60));
    let h = harness_with(&[a, b], UsageConfig::disabled(), breaker);

    let response = h.router.generate(&request()).await.expect("should succeed");

    assert_eq!(response.model_used, "B");
    let events = h.audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].failed_provider, "A");
    assert_eq!(events[0].successful_provider, "B");
    assert_eq!(events[0].reason, FailureReason::Timeout);
}

#[tokio::test]
async fn test_daily_limit_rejects_before_any_provider() {
    let x = provider("X", ProviderTier::Primary);
    let usage = UsageConfig {
        enabled: true,
        tracked_provider: Some("X".into()),
        daily_request_limit: 2,
        ..UsageConfig::default()
    };
    let h = harness(&[x.clone()], usage);

    h.router.generate(&request()).await.expect("first call");
    h.router.generate(&request()).await.expect("second call");
    let err = h.router.generate(&request()).await.expect_err("third call");

    assert!(matches!(err, Error::QuotaExceeded { ref reason } if reason.contains("Daily request limit")));
    assert_eq!(x.calls(), 2);
    assert!(h.audit.events().is_empty());
}

#[tokio::test]
async fn test_tracked_provider_defaults_to_first_in_order() {
    let a = provider("a", ProviderTier::Primary);
    let usage = UsageConfig {
        daily_request_limit: 1,
        ..UsageConfig::default()
    };
    let h = harness(&[provider("z", ProviderTier::Local), a], usage);

    assert_eq!(h.router.tracked_provider(), Some("a"));
    h.router.generate(&request()).await.expect("first call");
    assert!(matches!(
        h.router.generate(&request()).await,
        Err(Error::QuotaExceeded { .. })
    ));
}

#[tokio::test]
async fn test_fallback_success_is_not_counted_against_tracked_quota() {
    let a = failing("a", ProviderTier::Primary);
    let b = provider("b", ProviderTier::Fallback);
    let usage = UsageConfig {
        daily_request_limit: 1,
        ..UsageConfig::default()
    };
    let h = harness(&[a, b], usage);

    for _ in 0..3 {
        let response = h.router.generate(&request()).await.expect("fallback serves");
        assert_eq!(response.model_used, "b");
    }
}

#[tokio::test]
async fn test_audit_sink_failure_does_not_abort_request() {
    let a = failing("a", ProviderTier::Primary);
    let b = provider("b", ProviderTier::Fallback);
    let registry = ProviderRegistry::new(vec![a as Arc<dyn GenerationProvider>, b]);
    let router = GenerationRouter::new(
        registry,
        Arc::new(CircuitBreakerRegistry::default()),
        Arc::new(UsageTracker::new(UsageConfig::disabled())),
        Arc::new(BrokenAuditSink),
    );

    let response = router.generate(&request()).await.expect("should succeed");
    assert_eq!(response.model_used, "b");
}

#[tokio::test]
async fn test_open_breaker_skips_provider_and_records_circuit_open() {
    let a = Arc::new(MockGenerationProvider::new("a", ProviderTier::Primary).with_behavior(Behavior::FailStatus(503)));
    let b = provider("b", ProviderTier::Fallback);
    let h = harness(&[a.clone(), b], UsageConfig::disabled());

    for _ in 0..5 {
        h.router.generate(&request()).await.expect("b serves");
    }
    assert_eq!(a.calls(), 5);

    h.router.generate(&request()).await.expect("b serves");
    assert_eq!(a.calls(), 5);

    let events = h.audit.events();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0].reason, FailureReason::ServerError);
    assert_eq!(events[5].reason, FailureReason::CircuitOpen);

    let states = h.router.breaker_states().await;
    assert!(matches!(states[0], (ref name, CircuitBreakerState::Open { .. }) if name == "a"));
    assert_eq!(states[1].1, CircuitBreakerState::Closed);
}

#[tokio::test]
async fn test_invalid_request_is_rejected_up_front() {
    let a = provider("a", ProviderTier::Primary);
    let h = harness(&[a.clone()], UsageConfig::disabled());

    let err = h
        .router
        .generate(&request().with_temperature(3.0))
        .await
        .expect_err("invalid temperature");

    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(a.calls(), 0);
}

#[tokio::test]
async fn test_provider_health_uses_fresh_probes() {
    let a = Arc::new(MockGenerationProvider::new("a", ProviderTier::Primary).unavailable());
    let b = provider("b", ProviderTier::Local);
    let h = harness(&[a, b], UsageConfig::disabled());

    let health = h.router.provider_health().await;

    assert_eq!(health.len(), 2);
    assert_eq!(health[0].name, "a");
    assert!(!health[0].available);
    assert_eq!(health[1].tier, ProviderTier::Local);
    assert!(health[1].available);
}

#[tokio::test]
async fn test_no_providers_fails_cleanly() {
    let h = harness(&[], UsageConfig::disabled());
    assert!(matches!(
        h.router.generate(&request()).await,
        Err(Error::AllProvidersFailed { .. })
    ));
}
