//! Core domain logic for the gradebook.
//! This crate is the single source of truth for course invariants.

pub mod db;
pub mod format;
pub mod logging;
pub mod model;
pub mod numeric;
pub mod service;
pub mod sort;
pub mod stats;
pub mod storage;
pub mod transfer;
pub mod validation;

pub use format::{format_decimal, PLACEHOLDER};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{
    CourseField, CourseId, CourseRecord, UnknownFieldError, MAX_CREDITS, MAX_GRADE, PASS_THRESHOLD,
};
pub use numeric::parse_number;
pub use service::confirm::{Confirmer, Prompt};
pub use service::events::{Change, GradebookObserver, GradebookView, ObserverError};
pub use service::gradebook::{Gradebook, GradebookError, GradebookResult};
pub use sort::{Collator, FoldingCollator, SortDirection, SortKey, SortState};
pub use stats::CourseStats;
pub use storage::{
    CourseStorage, KeyValueStore, SqliteKeyValueStore, StorageError, StorageResult, STORAGE_KEY,
};
pub use transfer::{export_json, parse_import, ImportError, EXPORT_FILE_NAME};
pub use validation::{EditPolicy, EntryPolicy, EntryValidationError, NewCourse};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
