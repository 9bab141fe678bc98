//! HTTP Response Utilities
//!
//! Helper functions for processing HTTP responses from API providers.
//! Non-success statuses keep their code on the error so the router can
//! classify 429 and 5xx responses.

use std::time::Duration;

use relay_domain::error::{Error, Result};
use reqwest::Response;

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let code = status.as_u16();

            let context = match code {
                401 | 403 => "authentication failed".to_string(),
                429 => "rate limit exceeded".to_string(),
                500..=599 => format!("server error ({code})"),
                _ => format!("request failed ({code})"),
            };
            return Err(Error::provider_status(
                provider_name,
                code,
                format!("{context}: {error_text}"),
            ));
        }

        response.json().await.map_err(|e| {
            Error::provider(provider_name, format!("response parse failed: {e}"))
        })
    }

    /// Map a transport failure into a provider error
    ///
    /// Timeouts become [`Error::Timeout`]; connect failures keep a
    /// "failed to connect" prefix.
    pub fn send_error(provider_name: &str, timeout: Duration, error: &reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::timeout(format!("{provider_name} request"), timeout)
        } else if error.is_connect() {
            Error::provider(provider_name, format!("failed to connect: {error}"))
        } else {
            Error::provider(provider_name, format!("HTTP request failed: {error}"))
        }
    }

    /// Whether a probe response means the service is up
    pub fn probe_ok(response: &std::result::Result<Response, reqwest::Error>) -> bool {
        matches!(response, Ok(r) if r.status().is_success())
    }
}
