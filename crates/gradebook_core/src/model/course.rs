//! Course record model.
//!
//! # Responsibility
//! - Define the single persisted entity (name, credit weight, grade).
//! - Own range constants and clamping for numeric fields.
//!
//! # Invariants
//! - `id` is stable, immutable, and never reused for another record.
//! - `credits` is in `[0, MAX_CREDITS]`, `grade` is in `[0, MAX_GRADE]`.
//! - `name` carries no surrounding whitespace.

use crate::numeric::clamp;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a course record.
pub type CourseId = Uuid;

/// Upper bound for credit weight (ECTS-style).
pub const MAX_CREDITS: f64 = 60.0;
/// Upper bound for grade on the ten-point scale.
pub const MAX_GRADE: f64 = 10.0;
/// Lowest grade that counts as passed.
pub const PASS_THRESHOLD: f64 = 5.0;

/// One course entry.
///
/// Serialized with `ects` as the credit field name to keep stored and
/// exported files stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    pub name: String,
    #[serde(rename = "ects", alias = "credits")]
    pub credits: f64,
    pub grade: f64,
}

impl CourseRecord {
    /// Creates a record with a fresh id.
    ///
    /// Non-finite numbers fall back to 0 before clamping; the name is trimmed.
    pub fn new(name: &str, credits: f64, grade: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            credits: clamp_credits(finite_or_zero(credits)),
            grade: clamp_grade(finite_or_zero(grade)),
        }
    }

    /// Re-applies field invariants to a record read from outside the store.
    pub fn sanitized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.credits = clamp_credits(finite_or_zero(self.credits));
        self.grade = clamp_grade(finite_or_zero(self.grade));
        self
    }

    /// Whether the grade reaches the pass threshold.
    pub fn passed(&self) -> bool {
        self.grade >= PASS_THRESHOLD
    }
}

/// Editable record fields. `id` is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    Name,
    Credits,
    Grade,
}

impl CourseField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Credits => "credits",
            Self::Grade => "grade",
        }
    }
}

impl Display for CourseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unknown field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl Display for UnknownFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown course field `{}`; expected name|credits|grade",
            self.0
        )
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for CourseField {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "credits" | "ects" => Ok(Self::Credits),
            "grade" => Ok(Self::Grade),
            _ => Err(UnknownFieldError(value.to_string())),
        }
    }
}

/// Sanitizes every record and keeps only the first occurrence of each id.
pub(crate) fn sanitize_collection(records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id))
        .map(CourseRecord::sanitized)
        .collect()
}

pub(crate) fn clamp_credits(value: f64) -> f64 {
    clamp(value, 0.0, MAX_CREDITS)
}

pub(crate) fn clamp_grade(value: f64) -> f64 {
    clamp(value, 0.0, MAX_GRADE)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
