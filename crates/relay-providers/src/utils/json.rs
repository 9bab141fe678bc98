//! JSON Value Extension
//!
//! Accessors with default fallbacks for parsing provider responses.

/// Extension trait for `serde_json::Value` with convenient accessor methods
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use relay_providers::utils::JsonExt;
///
/// let usage = json!({"total_tokens": 42, "model": "m"});
/// assert_eq!(usage.u64_or("total_tokens", 0), 42);
/// assert_eq!(usage.str_or("missing", "default"), "default");
/// ```
pub trait JsonExt {
    /// Get string value or default
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str;

    /// Get u64 value or default
    fn u64_or(&self, key: &str, default: u64) -> u64;

    /// Get optional string
    fn opt_str(&self, key: &str) -> Option<&str>;
}

impl JsonExt for serde_json::Value {
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.opt_str(key).unwrap_or(default)
    }

    fn u64_or(&self, key: &str, default: u64) -> u64 {
        self.get(key)
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(default)
    }

    fn opt_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_json::Value::as_str)
    }
}

/// Parse a JSON number array into an `f32` vector
#[allow(clippy::cast_possible_truncation)]
pub fn f32_vector(values: &[serde_json::Value]) -> Vec<f32> {
    values
        .iter()
        .map(|v| v.as_f64().unwrap_or(0.0) as f32)
        .collect()
}
