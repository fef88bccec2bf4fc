//! Input policies for the two write paths.
//!
//! # Responsibility
//! - `EntryPolicy`: strict checks for the add form. Any invalid field
//!   aborts the add before the store is touched.
//! - `EditPolicy`: lenient coercion for inline edits. Invalid numbers are
//!   dropped so the previous value stays in place.
//!
//! # Invariants
//! - The two policies share `numeric::parse_number` but never each other's
//!   failure handling.

use crate::model::course::{clamp_credits, clamp_grade, CourseField};
use crate::numeric::parse_number;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why an add-form submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    MissingName,
    InvalidCredits,
    InvalidGrade,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "course name is required"),
            Self::InvalidCredits => write!(f, "credits must be a valid number"),
            Self::InvalidGrade => write!(f, "grade must be a valid number (0-10)"),
        }
    }
}

impl Error for EntryValidationError {}

/// Validated add-form input, ready for `Gradebook::add`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub credits: f64,
    pub grade: f64,
}

/// Strict policy used by the add path.
pub struct EntryPolicy;

impl EntryPolicy {
    /// Validates raw form text in field order: name, credits, grade.
    ///
    /// Range clamping is left to record construction; only parseability is
    /// checked here.
    pub fn validate(
        name: &str,
        credits: &str,
        grade: &str,
    ) -> Result<NewCourse, EntryValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EntryValidationError::MissingName);
        }
        let credits = parse_number(credits).ok_or(EntryValidationError::InvalidCredits)?;
        let grade = parse_number(grade).ok_or(EntryValidationError::InvalidGrade)?;

        Ok(NewCourse {
            name: name.to_string(),
            credits,
            grade,
        })
    }
}

/// Coerced value for a single field edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Name(String),
    Credits(f64),
    Grade(f64),
}

/// Lenient policy used by the inline edit path.
pub struct EditPolicy;

impl EditPolicy {
    /// Coerces raw edit text for `field`.
    ///
    /// Returns `None` when a numeric field does not parse; the caller keeps
    /// the existing value. Names always coerce (possibly to empty).
    pub fn coerce(field: CourseField, raw: &str) -> Option<FieldValue> {
        match field {
            CourseField::Name => Some(FieldValue::Name(raw.trim().to_string())),
            CourseField::Credits => parse_number(raw).map(|v| FieldValue::Credits(clamp_credits(v))),
            CourseField::Grade => parse_number(raw).map(|v| FieldValue::Grade(clamp_grade(v))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EditPolicy, EntryPolicy, EntryValidationError, FieldValue};
    use crate::model::course::CourseField;

    #[test]
    fn entry_rejects_each_invalid_field_in_order() {
        assert_eq!(
            EntryPolicy::validate("   ", "abc", "abc").unwrap_err(),
            EntryValidationError::MissingName
        );
        assert_eq!(
            EntryPolicy::validate("Calculus", "", "5").unwrap_err(),
            EntryValidationError::InvalidCredits
        );
        assert_eq!(
            EntryPolicy::validate("Calculus", "6", "x").unwrap_err(),
            EntryValidationError::InvalidGrade
        );
    }

    #[test]
    fn entry_accepts_comma_decimals_and_trims_name() {
        let course = EntryPolicy::validate(" Physics ", "6", "9,0").unwrap();
        assert_eq!(course.name, "Physics");
        assert_eq!(course.credits, 6.0);
        assert_eq!(course.grade, 9.0);
    }

    #[test]
    fn edit_drops_invalid_numbers_and_clamps_valid_ones() {
        assert_eq!(EditPolicy::coerce(CourseField::Credits, "abc"), None);
        assert_eq!(EditPolicy::coerce(CourseField::Grade, ""), None);
        assert_eq!(
            EditPolicy::coerce(CourseField::Grade, "12"),
            Some(FieldValue::Grade(10.0))
        );
        assert_eq!(
            EditPolicy::coerce(CourseField::Name, "  "),
            Some(FieldValue::Name(String::new()))
        );
    }
}
