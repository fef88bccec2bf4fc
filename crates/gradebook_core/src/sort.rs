//! Sort state and comparators for the course view.
//!
//! # Responsibility
//! - Track the selected sort key and direction.
//! - Order a borrowed view of the collection without touching storage order.
//!
//! # Invariants
//! - Selecting the current key toggles direction; any other key resets to
//!   ascending.
//! - Sorting is stable, so equal rows keep insertion order.
//! - Name comparison goes through an injected `Collator`.

use crate::model::course::{CourseField, CourseRecord};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Column the view is ordered by.
pub type SortKey = CourseField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Current view ordering. Defaults to name ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: CourseField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Applies one header selection: same key toggles, new key resets.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Compares two records under this state.
    pub fn compare(&self, a: &CourseRecord, b: &CourseRecord, collator: &dyn Collator) -> Ordering {
        let ordering = match self.key {
            CourseField::Name => collator.compare(a.name.trim(), b.name.trim()),
            CourseField::Credits => a.credits.total_cmp(&b.credits),
            CourseField::Grade => a.grade.total_cmp(&b.grade),
        };
        self.direction.apply(ordering)
    }
}

/// Locale-aware string comparison strategy.
pub trait Collator {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<F> Collator for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// Case-insensitive collator with accent folding.
///
/// Primary strength compares base letters (lowercased, NFD, combining marks
/// removed, final sigma folded). Secondary strength compares the marks on
/// each base letter, unaccented first. Names that only differ in case
/// compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingCollator;

impl FoldingCollator {
    fn primary_key(text: &str) -> String {
        text.to_lowercase()
            .nfd()
            .filter(|ch| !is_combining_mark(*ch))
            .map(fold_final_sigma)
            .collect()
    }

    fn accent_key(text: &str) -> Vec<Vec<char>> {
        let mut marks_per_letter: Vec<Vec<char>> = Vec::new();
        for ch in text.to_lowercase().nfd() {
            if !is_combining_mark(ch) {
                marks_per_letter.push(Vec::new());
            } else if let Some(marks) = marks_per_letter.last_mut() {
                marks.push(ch);
            } else {
                marks_per_letter.push(vec![ch]);
            }
        }
        marks_per_letter
    }
}

fn fold_final_sigma(ch: char) -> char {
    if ch == 'ς' {
        'σ'
    } else {
        ch
    }
}

impl Collator for FoldingCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        Self::primary_key(a)
            .cmp(&Self::primary_key(b))
            .then_with(|| Self::accent_key(a).cmp(&Self::accent_key(b)))
    }
}

/// Returns the collection ordered for display.
pub fn sorted_view<'a>(
    records: &'a [CourseRecord],
    state: SortState,
    collator: &dyn Collator,
) -> Vec<&'a CourseRecord> {
    let mut rows: Vec<&CourseRecord> = records.iter().collect();
    rows.sort_by(|a, b| state.compare(a, b, collator));
    rows
}
