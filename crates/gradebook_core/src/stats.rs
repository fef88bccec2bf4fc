//! Derived statistics over the course collection.
//!
//! Pure and idempotent: computing twice over the same slice yields the same
//! value, and nothing here can touch the store.

use crate::model::course::CourseRecord;

/// Aggregate figures shown next to the course table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseStats {
    /// Sum of credit weights.
    pub total_credits: f64,
    /// Credit-weighted mean grade; `None` when `total_credits` is zero.
    pub weighted_average: Option<f64>,
    /// Records with a passing grade.
    pub passed_count: usize,
    /// Records in the collection.
    pub total_count: usize,
}

impl CourseStats {
    pub fn compute(records: &[CourseRecord]) -> Self {
        let total_credits: f64 = records.iter().map(|record| record.credits).sum();
        let weighted_sum: f64 = records
            .iter()
            .map(|record| record.grade * record.credits)
            .sum();
        let weighted_average = if total_credits > 0.0 {
            Some(weighted_sum / total_credits)
        } else {
            None
        };

        Self {
            total_credits,
            weighted_average,
            passed_count: records.iter().filter(|record| record.passed()).count(),
            total_count: records.len(),
        }
    }
}
