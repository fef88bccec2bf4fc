//! Domain model for course records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by storage, sorting and views.
//!
//! # Invariants
//! - Every record is identified by a stable `CourseId`.
//! - Numeric fields stay inside their closed ranges once constructed.

pub mod course;
