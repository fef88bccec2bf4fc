//! Shared numeric coercion for user-entered and imported values.
//!
//! # Responsibility
//! - Parse numeric-looking text with `.` or `,` as decimal separator.
//! - Clamp values into closed ranges.
//!
//! # Invariants
//! - `parse_number` only ever returns finite values.
//! - Empty or whitespace-only text is invalid, never zero.
//! - Callers decide what invalid means (reject, retain, or default).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid decimal regex")
});

/// Parses decimal text, accepting a comma as the decimal point.
///
/// Only the first comma is rewritten, so `1,234,5` is rejected rather than
/// guessed at.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.replacen(',', ".", 1);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || !DECIMAL_RE.is_match(cleaned) {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Coerces a loosely typed JSON value into a finite number.
///
/// Numbers pass through, strings go through [`parse_number`], anything else
/// is invalid.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

/// Clamps `value` into `[min, max]`. NaN maps to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}
