//! Core use-case services.
//!
//! # Responsibility
//! - Own the authoritative course collection and sort state (`Gradebook`).
//! - Publish change events to persistence and presentation observers.
//! - Gate destructive operations behind caller-supplied confirmation.

pub mod confirm;
pub mod demo;
pub mod events;
pub mod gradebook;
