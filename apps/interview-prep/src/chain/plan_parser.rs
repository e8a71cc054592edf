//! Plan Validator — turns raw stage-1 text into a [`Plan`].

use thiserror::Error;

use crate::models::Plan;

#[derive(Debug, Clone, Error)]
pub enum PlanParseError {
    /// The text could not be decoded as a plan.
    #[error("Plan JSON parsing failed: {0}")]
    Malformed(String),

    /// The single repair round also produced an undecodable plan.
    /// Both raw outputs are kept so the caller can show what the model said.
    #[error("Plan repair failed: {reason}")]
    RepairFailed {
        original: String,
        repaired: String,
        reason: String,
    },
}

/// Decodes a plan from model output.
///
/// Accepts the JSON bare or inside a Markdown code fence. If the whole text does
/// not decode, the span from the first `{` to the last `}` is tried once more,
/// which recovers plans wrapped in a sentence of chatter.
pub fn parse_plan(raw: &str) -> Result<Plan, PlanParseError> {
    let text = strip_json_fences(raw);

    let first_error = match serde_json::from_str::<Plan>(text) {
        Ok(plan) => return Ok(plan),
        Err(e) => e,
    };

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => serde_json::from_str::<Plan>(&text[start..=end])
            .map_err(|e| PlanParseError::Malformed(format!("initial + substring: {e}"))),
        _ => Err(PlanParseError::Malformed(first_error.to_string())),
    }
}

/// Removes a Markdown code fence around the payload, whatever its language
/// tag (```json, ```JSON, ```javascript, or none). An unclosed fence is
/// still opened so a truncated reply reaches the decoder without the tag.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(fenced) = text.strip_prefix("```") else {
        return text;
    };
    let body = fenced
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .trim_start();
    body.strip_suffix("```").unwrap_or(body).trim()
}
