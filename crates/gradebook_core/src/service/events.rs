//! Change events and the observer contract.
//!
//! # Responsibility
//! - Describe every state change the gradebook can publish.
//! - Carry the post-change, post-sort view to observers.
//!
//! # Invariants
//! - Observers run in subscription order after the change is applied.
//! - `GradebookView::records` is insertion order; `rows` is display order.

use crate::model::course::{CourseField, CourseId, CourseRecord};
use crate::sort::{sorted_view, Collator, SortState};
use crate::stats::CourseStats;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// State change published after each gradebook operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Explicit redraw request with no state change.
    Refreshed,
    Added { id: CourseId },
    /// `applied` is false when a numeric edit did not parse.
    Updated {
        id: CourseId,
        field: CourseField,
        applied: bool,
    },
    Deleted { id: CourseId, removed: bool },
    Cleared { removed: usize },
    Replaced { count: usize },
    DemoAppended { count: usize },
    Resorted { state: SortState },
}

impl Change {
    /// Whether the collection itself changed and must be persisted.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Refreshed | Self::Resorted { .. })
    }

    /// Stable event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Refreshed => "refreshed",
            Self::Added { .. } => "added",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
            Self::Cleared { .. } => "cleared",
            Self::Replaced { .. } => "replaced",
            Self::DemoAppended { .. } => "demo_appended",
            Self::Resorted { .. } => "resorted",
        }
    }
}

/// Snapshot handed to observers.
#[derive(Debug)]
pub struct GradebookView<'g> {
    /// Authoritative collection in insertion order.
    pub records: &'g [CourseRecord],
    /// Same records in current display order.
    pub rows: Vec<&'g CourseRecord>,
    pub stats: CourseStats,
    pub sort: SortState,
}

impl<'g> GradebookView<'g> {
    pub(crate) fn build(
        records: &'g [CourseRecord],
        sort: SortState,
        collator: &dyn Collator,
    ) -> Self {
        Self {
            records,
            rows: sorted_view(records, sort, collator),
            stats: CourseStats::compute(records),
            sort,
        }
    }
}

/// Failure raised by an observer while reacting to a change.
#[derive(Debug)]
pub enum ObserverError {
    Storage(StorageError),
    Render(String),
}

impl Display for ObserverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(_) => write!(f, "failed to persist courses"),
            Self::Render(message) => write!(f, "failed to render courses: {message}"),
        }
    }
}

impl Error for ObserverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Render(_) => None,
        }
    }
}

impl From<StorageError> for ObserverError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Subscriber notified after every gradebook change.
pub trait GradebookObserver {
    fn on_change(&mut self, change: &Change, view: &GradebookView<'_>) -> Result<(), ObserverError>;
}
