//! Import normalization and export serialization.
//!
//! # Responsibility
//! - Turn arbitrary external JSON into valid course records.
//! - Produce the pretty-printed export document.
//!
//! # Invariants
//! - Imported records always get fresh ids; input ids are ignored.
//! - Invalid numeric input becomes 0 after clamping, never an error.
//! - Only a non-array top level (or unparsable text) fails the import.
//! - Number literals outside the f64 range are kept as text by the parser
//!   and coerce to 0 per item, so they never fail the document.

use crate::model::course::{clamp_credits, clamp_grade, CourseRecord};
use crate::numeric::coerce_number;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Suggested file name for exported collections.
pub const EXPORT_FILE_NAME: &str = "gradebook-data.json";

/// Why an import document was rejected.
#[derive(Debug)]
pub enum ImportError {
    /// Text is not valid JSON.
    Malformed(serde_json::Error),
    /// Top-level JSON value is not an array.
    NotAnArray { found: &'static str },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(_) => write!(f, "import file is not valid JSON"),
            Self::NotAnArray { found } => write!(
                f,
                "invalid file format: expected a list of courses, found {found}"
            ),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::NotAnArray { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Parses and normalizes an import document.
pub fn parse_import(text: &str) -> Result<Vec<CourseRecord>, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(items) => Ok(items.iter().map(normalize_item).collect()),
        other => Err(ImportError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

/// Serializes the collection as indented JSON, ids included.
pub fn export_json(records: &[CourseRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

fn normalize_item(item: &Value) -> CourseRecord {
    let empty = Map::new();
    let fields = item.as_object().unwrap_or(&empty);

    let name = fields.get("name").map(coerce_name).unwrap_or_default();
    let credits = fields
        .get("ects")
        .or_else(|| fields.get("credits"))
        .and_then(coerce_number)
        .unwrap_or(0.0);
    let grade = fields.get("grade").and_then(coerce_number).unwrap_or(0.0);

    CourseRecord::new(&name, clamp_credits(credits), clamp_grade(grade))
}

// Falsy scalars (false, 0, "") become empty; other scalars are stringified.
fn coerce_name(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) if number.as_f64() != Some(0.0) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
