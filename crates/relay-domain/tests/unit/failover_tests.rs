//! Unit tests for failover audit records

use relay_domain::constants::FAILOVER_NO_PROVIDER;
use relay_domain::value_objects::{FailoverEvent, FailureReason, RoutingOperation};

#[test]
fn test_event_names_next_provider() {
    let event = FailoverEvent::new(
        RoutingOperation::Generation,
        "gemini",
        Some("groq"),
        FailureReason::RateLimited,
        "429 Too Many Requests",
    );

    assert_eq!(event.failed_provider, "gemini");
    assert_eq!(event.successful_provider, "groq");
    assert!(!event.is_terminal());
}

#[test]
fn test_event_without_next_provider_is_terminal() {
    let event = FailoverEvent::new(
        RoutingOperation::Embedding,
        "null",
        None,
        FailureReason::Other("boom".to_string()),
        "boom",
    );

    assert_eq!(event.successful_provider, FAILOVER_NO_PROVIDER);
    assert!(event.is_terminal());
}

#[test]
fn test_reason_display() {
    assert_eq!(FailureReason::ConnectionRefused.to_string(), "connection refused");
    assert_eq!(FailureReason::CircuitOpen.to_string(), "circuit open");
    assert_eq!(FailureReason::Other("odd".into()).to_string(), "odd");
}

#[test]
fn test_event_serializes_reason_as_tagged_object() {
    let event = FailoverEvent::new(
        RoutingOperation::Generation,
        "a",
        Some("b"),
        FailureReason::Timeout,
        "timed out",
    );
    let json = serde_json::to_value(&event).expect("serialization should succeed");

    assert_eq!(json["reason"]["kind"], "timeout");
    assert_eq!(json["operation"], "generation");

    let back: FailoverEvent = serde_json::from_value(json).expect("deserialization should succeed");
    assert_eq!(back, event);
}

#[test]
fn test_other_reason_keeps_message_in_json() {
    let reason = FailureReason::Other("bad gateway-ish".into());
    let json = serde_json::to_value(&reason).expect("serialization should succeed");
    assert_eq!(json["kind"], "other");
    assert_eq!(json["message"], "bad gateway-ish");
}
