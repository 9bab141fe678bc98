//! Unit tests for generation value objects

use relay_domain::Error;
use relay_domain::value_objects::{ChatMessage, GenerateRequest, GenerateResponse, MessageRole};

#[test]
fn test_request_builder() {
    let request = GenerateRequest::new("be brief")
        .with_message(ChatMessage::user("hello"))
        .with_message(ChatMessage::assistant("hi"))
        .with_message(ChatMessage::user("again"))
        .with_temperature(0.7)
        .with_max_output_tokens(128);

    assert_eq!(request.system_instruction, "be brief");
    assert_eq!(request.messages.len(), 3);
    assert_eq!(request.last_user_message(), Some("again"));
    assert!(request.validate().is_ok());
}

#[test]
fn test_temperature_out_of_range_is_rejected() {
    let request = GenerateRequest::new("").with_temperature(2.5);
    assert!(matches!(
        request.validate(),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_zero_max_tokens_is_rejected() {
    let request = GenerateRequest::new("").with_max_output_tokens(0);
    assert!(request.validate().is_err());
}

#[test]
fn test_boundary_temperatures_are_valid() {
    assert!(GenerateRequest::new("").with_temperature(0.0).validate().is_ok());
    assert!(GenerateRequest::new("").with_temperature(2.0).validate().is_ok());
}

#[test]
fn test_roles_serialize_lowercase() {
    let json = serde_json::to_string(&ChatMessage::system("x")).expect("serialization should succeed");
    assert!(json.contains("\"system\""));
    assert_eq!(MessageRole::Assistant.as_str(), "assistant");
}

#[test]
fn test_response_attribution() {
    let response = GenerateResponse::new("ok", "model-x", 12).attributed_to("groq", 250);
    assert_eq!(response.model_used, "groq");
    assert_eq!(response.latency_ms, 250);
    assert_eq!(response.tokens_used, 12);
}
