//! Common helpers for generation providers

use relay_domain::value_objects::GenerateRequest;
use serde_json::{Value, json};

/// Chat-style message list: the system instruction first (when set), then
/// the conversation in order
pub fn chat_messages(request: &GenerateRequest) -> Vec<Value> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if !request.system_instruction.trim().is_empty() {
        messages.push(json!({
            "role": "system",
            "content": request.system_instruction,
        }));
    }
    messages.extend(request.messages.iter().map(|m| {
        json!({
            "role": m.role.as_str(),
            "content": m.content,
        })
    }));
    messages
}

/// Rough token estimate for providers that do not report usage
pub fn estimate_tokens(text: &str) -> u64 {
    let words = text.split_whitespace().count();
    u64::try_from(words).unwrap_or(u64::MAX)
}
