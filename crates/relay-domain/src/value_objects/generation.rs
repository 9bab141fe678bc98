//! Text Generation Value Objects
//!
//! Request and response types exchanged between callers, the generation
//! router and generation providers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role tag attached to a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instruction-level message
    System,
    /// Message written by the end user
    User,
    /// Message previously produced by a model
    Assistant,
}

impl MessageRole {
    /// Wire name used by chat-style APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single role-tagged message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who authored the message
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Value Object: Generation Request
///
/// Carries a system instruction, the ordered conversation, and optional
/// sampling controls. Temperature is meaningful in `0.0..=2.0`.
///
/// ## Example
///
/// ```rust
/// use relay_domain::value_objects::{ChatMessage, GenerateRequest};
///
/// let request = GenerateRequest::new("You are terse.")
///     .with_message(ChatMessage::user("Say hi"))
///     .with_temperature(0.2)
///     .with_max_output_tokens(64);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// System instruction prepended by providers
    pub system_instruction: String,
    /// Conversation, oldest first
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Cap on generated tokens
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Create a request with a system instruction and no messages
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            ..Default::default()
        }
    }

    /// Append a message
    #[must_use]
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token cap
    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Check the request before it is sent anywhere
    pub fn validate(&self) -> Result<()> {
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(Error::invalid_argument(format!(
                    "temperature must be within 0.0..=2.0, got {temperature}"
                )));
            }
        }
        if self.max_output_tokens == Some(0) {
            return Err(Error::invalid_argument(
                "max_output_tokens must be greater than 0",
            ));
        }
        Ok(())
    }

    /// The most recent user message, if any
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
    }
}

/// Value Object: Generation Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text
    pub text: String,
    /// Name of the provider that produced the text
    pub model_used: String,
    /// Tokens consumed by the call
    pub tokens_used: u64,
    /// Wall-clock time of the successful attempt, in milliseconds
    pub latency_ms: u64,
}

impl GenerateResponse {
    /// Create a response for a provider
    pub fn new(text: impl Into<String>, model_used: impl Into<String>, tokens_used: u64) -> Self {
        Self {
            text: text.into(),
            model_used: model_used.into(),
            tokens_used,
            latency_ms: 0,
        }
    }

    /// Stamp the producing provider and measured latency
    #[must_use]
    pub fn attributed_to(mut self, provider: impl Into<String>, latency_ms: u64) -> Self {
        self.model_used = provider.into();
        self.latency_ms = latency_ms;
        self
    }
}
