//! JSON Value Extension
//!
//! Accessors for provider payloads that tolerate missing or mistyped fields.

/// Extension trait for `serde_json::Value`
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use sgw_providers::utils::JsonExt;
///
/// let usage = json!({"prompt_tokens": 12, "model": "gpt-4o-mini"});
/// assert_eq!(usage.opt_u64("prompt_tokens"), Some(12));
/// assert_eq!(usage.opt_str("model"), Some("gpt-4o-mini"));
/// assert_eq!(usage.opt_u64("missing"), None);
/// ```
pub trait JsonExt {
    /// Get optional string
    fn opt_str(&self, key: &str) -> Option<&str>;

    /// Get optional u64
    fn opt_u64(&self, key: &str) -> Option<u64>;

    /// Get optional array
    fn opt_array(&self, key: &str) -> Option<&Vec<serde_json::Value>>;
}

impl JsonExt for serde_json::Value {
    #[inline]
    fn opt_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    #[inline]
    fn opt_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.as_u64())
    }

    #[inline]
    fn opt_array(&self, key: &str) -> Option<&Vec<serde_json::Value>> {
        self.get(key).and_then(|v| v.as_array())
    }
}
