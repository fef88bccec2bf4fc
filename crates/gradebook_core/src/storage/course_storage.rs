//! Course collection persistence under a single versioned key.
//!
//! # Invariants
//! - The stored value is a JSON array in insertion order, never view order.
//! - `load` returns an empty collection for missing, malformed, or
//!   non-array data and logs why.
//! - A change to the record shape must come with a new `STORAGE_KEY`.

use super::{KeyValueStore, StorageResult};
use crate::model::course::{sanitize_collection, CourseRecord};
use crate::service::events::{Change, GradebookObserver, GradebookView, ObserverError};
use log::{info, warn};
use serde_json::Value;

/// Storage key for the course collection.
pub const STORAGE_KEY: &str = "gradebook-data-v1";

/// Persistence adapter mapping courses onto a key-value store.
pub struct CourseStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CourseStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serializes the full collection, replacing the previous value.
    pub fn save(&self, records: &[CourseRecord]) -> StorageResult<()> {
        let payload = serde_json::to_string(records)?;
        self.store.set(STORAGE_KEY, &payload)?;
        info!(
            "event=courses_save module=storage status=ok count={}",
            records.len()
        );
        Ok(())
    }

    /// Restores the collection. Never fails; unusable data loads as empty.
    pub fn load(&self) -> Vec<CourseRecord> {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=courses_load module=storage status=skip reason=missing");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=courses_load module=storage status=error error_code=read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match decode_courses(&raw) {
            Ok(records) => {
                info!(
                    "event=courses_load module=storage status=ok count={}",
                    records.len()
                );
                records
            }
            Err(reason) => {
                warn!(
                    "event=courses_load module=storage status=error error_code=invalid_data reason={}",
                    reason
                );
                Vec::new()
            }
        }
    }
}

fn decode_courses(raw: &str) -> Result<Vec<CourseRecord>, String> {
    let value: Value = serde_json::from_str(raw).map_err(|err| format!("malformed_json:{err}"))?;
    if !value.is_array() {
        return Err("not_an_array".to_string());
    }
    let records: Vec<CourseRecord> =
        serde_json::from_value(value).map_err(|err| format!("shape_mismatch:{err}"))?;
    Ok(sanitize_collection(records))
}

impl<S: KeyValueStore> GradebookObserver for CourseStorage<S> {
    fn on_change(&mut self, change: &Change, view: &GradebookView<'_>) -> Result<(), ObserverError> {
        if change.is_mutation() {
            self.save(view.records)?;
        }
        Ok(())
    }
}
