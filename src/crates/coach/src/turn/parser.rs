//! Model Reply Parser
//!
//! Extracts the JSON object from a raw model reply. Models sometimes wrap
//! their JSON in markdown fences or surround it with prose, so extraction
//! tries a fenced block first, then the outermost brace span, then the whole
//! trimmed reply. Anything that still fails to decode as a JSON object is a
//! decode error; the caller answers with a generic apology instead of
//! attempting a repair.

use serde_json::Value;
use tracing::debug;

use crate::error::{CoachError, Result};

/// Parse a raw model reply into a JSON object value
pub fn parse_reply(raw: &str) -> Result<Value> {
    debug!("Parsing model reply: {}", raw);

    let candidate = extract_json(raw).unwrap_or_else(|| raw.trim());

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| CoachError::Decode(format!("Reply is not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(CoachError::Decode(
            "Reply is not a JSON object".to_string(),
        ));
    }

    Ok(value)
}

/// Extract a JSON candidate from a text reply
///
/// Looks for ```json...``` code blocks or a raw JSON object span.
fn extract_json(text: &str) -> Option<&str> {
    // Try to find ```json ... ``` block
    if let Some(start) = text.find("```json") {
        let content = &text[start + 7..];
        if let Some(end) = content.find("```") {
            return Some(content[..end].trim());
        }
    }

    // Try to find ```JSON ... ``` block (uppercase)
    if let Some(start) = text.find("```JSON") {
        let content = &text[start + 7..];
        if let Some(end) = content.find("```") {
            return Some(content[..end].trim());
        }
    }

    // Try to find the outermost raw JSON object
    if let Some(start) = text.find('{') {
        if let Some(end) = text.rfind('}') {
            if end > start {
                return Some(text[start..=end].trim());
            }
        }
    }

    None
}
