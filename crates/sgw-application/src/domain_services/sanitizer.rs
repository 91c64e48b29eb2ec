//! Output sanitization
//!
//! Best-effort, pattern-based cleanup of provider output. It removes the
//! markup a suggestion must never carry and pulls out an embedded JSON
//! object when one is present. This is not an HTML parser: callers that
//! render suggestions into untrusted contexts must still escape them. A
//! vetted sanitizer can replace this one behind `sanitize` without touching
//! call sites.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sgw_domain::constants::DEFAULT_FALLBACK_TEXT;

static DANGEROUS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<\s*(?:script|iframe)[^>]*>.*?<\s*/\s*(?:script|iframe)\s*>")
        .expect("Invalid regex")
});

static DANGEROUS_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*/?\s*(?:script|iframe)[^>]*>?").expect("Invalid regex"));

static JAVASCRIPT_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("Invalid regex"));

static EVENT_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bon[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).expect("Invalid regex")
});

/// Sanitized provider output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizedOutput {
    /// Text safe to show as a suggestion
    pub text: String,
    /// JSON object found in the output, if one parsed
    pub structured_payload: Option<serde_json::Value>,
}

/// Cleans raw provider text
#[derive(Debug, Clone)]
pub struct OutputSanitizer {
    fallback_text: String,
}

impl Default for OutputSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_TEXT)
    }
}

impl OutputSanitizer {
    /// Create a sanitizer returning `fallback_text` when nothing usable remains
    pub fn new(fallback_text: impl Into<String>) -> Self {
        Self {
            fallback_text: fallback_text.into(),
        }
    }

    /// Text returned for empty output
    pub fn fallback_text(&self) -> &str {
        &self.fallback_text
    }

    /// Sanitize raw output
    ///
    /// The returned text is at most `max_output_length` characters and never
    /// contains `<script`, `<iframe` or `javascript:` in any letter case.
    pub fn sanitize(&self, raw: Option<&str>, max_output_length: usize) -> SanitizedOutput {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return self.fallback(max_output_length),
        };

        let truncated = truncate_chars(raw, max_output_length);
        let printable = strip_control_chars(truncated);
        let cleaned = strip_dangerous_markup(printable);
        let structured_payload = extract_json_object(&cleaned);
        let text = cleaned.trim();

        if text.is_empty() {
            return self.fallback(max_output_length);
        }

        SanitizedOutput {
            text: text.to_string(),
            structured_payload,
        }
    }

    fn fallback(&self, max_output_length: usize) -> SanitizedOutput {
        SanitizedOutput {
            text: truncate_chars(&self.fallback_text, max_output_length).to_string(),
            structured_payload: None,
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

// Runs before markup removal so a control character cannot split a tag name.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

// Removal can splice a new forbidden sequence together, so passes repeat until
// nothing changes. Every pass that changes the text shortens it.
fn strip_dangerous_markup(text: String) -> String {
    let mut current = text;
    loop {
        let next = DANGEROUS_BLOCK.replace_all(&current, "");
        let next = DANGEROUS_TAG.replace_all(&next, "");
        let next = JAVASCRIPT_URI.replace_all(&next, "");
        let next = EVENT_HANDLER.replace_all(&next, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn extract_json_object(text: &str) -> Option<serde_json::Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(&text[start..=end])
        .ok()
        .filter(serde_json::Value::is_object)
}
