//! Failure classification
//!
//! Maps a provider error to a [`FailureReason`] for logs and audit records.
//! Structured variants are checked first; errors that only carry text fall
//! back to message patterns.

use relay_domain::error::Error;
use relay_domain::value_objects::FailureReason;

const CONNECTION_PATTERNS: &[&str] = &[
    "connection refused",
    "econnrefused",
    "failed to connect",
    "error trying to connect",
    "connection reset",
];

const TIMEOUT_PATTERNS: &[&str] = &["timed out", "timeout", "deadline exceeded"];

const RATE_LIMIT_CODES: &[&str] = &["429"];

const RATE_LIMIT_PATTERNS: &[&str] = &[
    "rate limit",
    "rate_limit",
    "too many requests",
    "resource exhausted",
];

const SERVER_ERROR_CODES: &[&str] = &["500", "502", "503", "504"];

const SERVER_ERROR_PATTERNS: &[&str] = &[
    "internal server error",
    "bad gateway",
    "service unavailable",
    "overloaded",
];

/// Classify `error` into a failure reason
pub fn classify_failure(error: &Error) -> FailureReason {
    match error {
        Error::CircuitOpen { .. } => return FailureReason::CircuitOpen,
        Error::Timeout { .. } => return FailureReason::Timeout,
        Error::Provider {
            status: Some(status),
            ..
        } => {
            if *status == 429 {
                return FailureReason::RateLimited;
            }
            if (500..600).contains(status) {
                return FailureReason::ServerError;
            }
        }
        _ => {}
    }

    classify_message(&error.to_string())
}

/// Classify a raw error message by pattern
pub fn classify_message(message: &str) -> FailureReason {
    let msg = message.to_lowercase();

    if CONNECTION_PATTERNS.iter().any(|p| msg.contains(p)) {
        return FailureReason::ConnectionRefused;
    }
    if TIMEOUT_PATTERNS.iter().any(|p| msg.contains(p)) {
        return FailureReason::Timeout;
    }
    if RATE_LIMIT_PATTERNS.iter().any(|p| msg.contains(p))
        || RATE_LIMIT_CODES.iter().any(|c| contains_status_code(&msg, c))
    {
        return FailureReason::RateLimited;
    }
    if SERVER_ERROR_PATTERNS.iter().any(|p| msg.contains(p))
        || SERVER_ERROR_CODES.iter().any(|c| contains_status_code(&msg, c))
    {
        return FailureReason::ServerError;
    }

    FailureReason::Other(message.to_string())
}

/// Whether `code` appears in `msg` as a standalone number
fn contains_status_code(msg: &str, code: &str) -> bool {
    msg.match_indices(code).any(|(start, _)| {
        let before = msg[..start].chars().next_back();
        let after = msg[start + code.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_alphanumeric())
            && !after.is_some_and(|c| c.is_ascii_alphanumeric())
    })
}
