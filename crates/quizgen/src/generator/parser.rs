//! Lenient JSON extraction from model output.
//!
//! Models asked for "only JSON" still wrap replies in markdown fences or
//! chatty prose. Parsing is two-stage:
//! 1. Parse the whole text as JSON.
//! 2. Otherwise take the first ```` ```json ```` fenced block or the first
//!    `{...}` span, strip the fence markers and parse that.
//!
//! No repair is attempted beyond that.

use std::sync::LazyLock;

use quizgen_common::ParseFailure;
use regex::Regex;
use serde_json::Value;

/// First fenced JSON block, or the shortest brace span starting at the first `{`
static JSON_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(```json\n([\s\S]*?)\n```|\{[\s\S]*?\})").expect("JSON span pattern is valid")
});

/// Extract a JSON value from raw model text
pub fn parse_model_output(raw: &str) -> Result<Value, ParseFailure> {
    let direct_err = match serde_json::from_str(raw) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let Some(span) = JSON_SPAN.captures(raw).and_then(|c| c.get(1)) else {
        return Err(ParseFailure::new(direct_err.to_string()));
    };

    let candidate = span.as_str().replace("```json", "").replace("```", "");
    serde_json::from_str(&candidate).map_err(|e| {
        tracing::debug!(span = %candidate, error = %e, "Extracted span is not valid JSON");
        ParseFailure::new(e.to_string())
    })
}
