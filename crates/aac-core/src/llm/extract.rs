//! Best-effort JSON extraction from model free text.
//!
//! Completions are asked for JSON but often arrive wrapped in prose or a
//! Markdown code fence. Extraction tries, in order: the whole text, the first
//! fenced block, then the span from the first `{` to the last `}`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```(?:json)?\s*(.*?)\s*```").expect("code fence pattern is valid")
});

static BRACE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\{.*\})").expect("brace span pattern is valid"));

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no JSON found in model response")]
    NoJson,

    #[error("model response contained malformed JSON: {source}")]
    Malformed {
        candidate: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model JSON did not have the expected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Pull a JSON value out of a model response.
///
/// # Errors
///
/// - [`ExtractionError::NoJson`] when the text has no fenced block and no
///   brace span
/// - [`ExtractionError::Malformed`] when the chosen candidate does not parse
pub fn extract_json(text: &str) -> Result<Value, ExtractionError> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_object() || value.is_array() {
            return Ok(value);
        }
    }

    let candidate = CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .or_else(|| BRACE_SPAN.captures(text).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
        .ok_or(ExtractionError::NoJson)?;

    serde_json::from_str(candidate).map_err(|source| ExtractionError::Malformed {
        candidate: candidate.to_string(),
        source,
    })
}

/// [`extract_json`], then deserialize into `T`.
pub fn extract_as<T: DeserializeOwned>(text: &str) -> Result<T, ExtractionError> {
    serde_json::from_value(extract_json(text)?).map_err(ExtractionError::Shape)
}
