use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// Two-attempt parse of raw model output. Models routinely wrap an
/// otherwise valid JSON body in a Markdown code fence with a language tag;
/// one strip-and-retry covers that. Anything still unparseable is a hard
/// `Extraction` failure, never an empty success.
pub fn parse_lenient<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let trimmed = raw.trim();
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let stripped = strip_code_fences(trimmed);
            if stripped == trimmed {
                return Err(Error::Extraction(first_err.to_string()));
            }
            serde_json::from_str(stripped).map_err(|e| Error::Extraction(e.to_string()))
        }
    }
}

fn strip_code_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // Drop the language tag (e.g. "json") with the rest of the opening
        // fence line.
        s = match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => rest,
        };
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Models emit scores as numbers, floats, or quoted strings. Anything
/// recognizably numeric is clamped into 0..=100; the rest is discarded.
pub fn coerce_score(value: &JsonValue) -> Option<i32> {
    let raw = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some((raw.round() as i32).clamp(0, 100))
}
