//! Gradebook controller: the single owner of course state.
//!
//! # Responsibility
//! - Provide add/update/delete/clear/replace/import/demo operations.
//! - Run every state change through one pipeline: mutate, build the sorted
//!   view, notify observers in subscription order.
//!
//! # Invariants
//! - Record ids are unique and immutable for the collection lifetime.
//! - `credits` and `grade` stay clamped after every operation.
//! - Lookup misses on update/delete are silent no-ops.
//! - Declined confirmations and failed imports leave state untouched.

use crate::model::course::{sanitize_collection, CourseField, CourseId, CourseRecord};
use crate::service::confirm::{Confirmer, Prompt};
use crate::service::demo::DEMO_COURSES;
use crate::service::events::{Change, GradebookObserver, GradebookView, ObserverError};
use crate::sort::{Collator, FoldingCollator, SortKey, SortState};
use crate::stats::CourseStats;
use crate::storage::{CourseStorage, KeyValueStore};
use crate::transfer::{export_json, parse_import, ImportError};
use crate::validation::{EditPolicy, EntryPolicy, EntryValidationError, FieldValue, NewCourse};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GradebookResult<T> = Result<T, GradebookError>;

/// Error surfaced by gradebook operations.
#[derive(Debug)]
pub enum GradebookError {
    /// Add-form input rejected before any mutation.
    Validation(EntryValidationError),
    /// Import document rejected before any mutation.
    Import(ImportError),
    /// Export serialization failed.
    Export(serde_json::Error),
    /// An observer failed after the change was applied in memory.
    Observer(ObserverError),
}

impl Display for GradebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Export(_) => write!(f, "export failed"),
            Self::Observer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GradebookError {
    // Wrapping variants are transparent: they display the inner error and
    // forward its source, so error chains do not repeat messages.
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => err.source(),
            Self::Import(err) => err.source(),
            Self::Export(err) => Some(err),
            Self::Observer(err) => err.source(),
        }
    }
}

impl From<EntryValidationError> for GradebookError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ImportError> for GradebookError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<ObserverError> for GradebookError {
    fn from(value: ObserverError) -> Self {
        Self::Observer(value)
    }
}

/// Controller owning the course collection, sort state, and observers.
pub struct Gradebook<'a> {
    records: Vec<CourseRecord>,
    sort: SortState,
    collator: Box<dyn Collator + 'a>,
    observers: Vec<Box<dyn GradebookObserver + 'a>>,
}

impl Default for Gradebook<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Gradebook<'a> {
    /// Creates an empty gradebook with the default collator.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a gradebook from existing records, re-applying invariants.
    pub fn with_records(records: Vec<CourseRecord>) -> Self {
        Self {
            records: sanitize_collection(records),
            sort: SortState::default(),
            collator: Box::new(FoldingCollator),
            observers: Vec::new(),
        }
    }

    /// Restores persisted courses and subscribes the storage as the first
    /// observer, so every later mutation is saved before anything renders.
    pub fn open<S: KeyValueStore + 'a>(storage: CourseStorage<S>) -> Self {
        let mut gradebook = Self::with_records(storage.load());
        gradebook.subscribe(storage);
        gradebook
    }

    /// Replaces the name collator.
    pub fn with_collator(mut self, collator: impl Collator + 'a) -> Self {
        self.collator = Box::new(collator);
        self
    }

    /// Registers an observer after the existing ones.
    pub fn subscribe(&mut self, observer: impl GradebookObserver + 'a) {
        self.observers.push(Box::new(observer));
    }

    /// Courses in insertion (storage) order.
    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn get(&self, id: CourseId) -> Option<&CourseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn stats(&self) -> CourseStats {
        CourseStats::compute(&self.records)
    }

    /// Sorted view plus statistics, as observers receive it.
    pub fn view(&self) -> GradebookView<'_> {
        GradebookView::build(&self.records, self.sort, &*self.collator)
    }

    /// Notifies observers without changing state (initial render).
    pub fn refresh(&mut self) -> GradebookResult<()> {
        self.publish(Change::Refreshed)
    }

    /// Appends a course. Non-finite numbers become 0; ranges are clamped.
    pub fn add(&mut self, name: &str, credits: f64, grade: f64) -> GradebookResult<CourseId> {
        let record = CourseRecord::new(name, credits, grade);
        let id = record.id;
        self.records.push(record);
        self.publish(Change::Added { id })?;
        Ok(id)
    }

    /// Validates raw form input with the strict entry policy, then adds.
    ///
    /// Nothing is mutated or published when validation fails.
    pub fn submit(&mut self, name: &str, credits: &str, grade: &str) -> GradebookResult<CourseId> {
        let NewCourse {
            name,
            credits,
            grade,
        } = EntryPolicy::validate(name, credits, grade)?;
        self.add(&name, credits, grade)
    }

    /// Edits one field with the lenient edit policy.
    ///
    /// Returns `false` when no record has `id`. A numeric value that fails to
    /// parse keeps the previous value; the change is still published.
    pub fn update(&mut self, id: CourseId, field: CourseField, raw: &str) -> GradebookResult<bool> {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            debug!("event=course_update module=service status=skip reason=not_found id={id}");
            return Ok(false);
        };

        let applied = match EditPolicy::coerce(field, raw) {
            Some(FieldValue::Name(name)) => {
                record.name = name;
                true
            }
            Some(FieldValue::Credits(credits)) => {
                record.credits = credits;
                true
            }
            Some(FieldValue::Grade(grade)) => {
                record.grade = grade;
                true
            }
            None => false,
        };

        self.publish(Change::Updated { id, field, applied })?;
        Ok(true)
    }

    /// Removes a course. Returns whether a record was removed.
    pub fn delete(&mut self, id: CourseId) -> GradebookResult<bool> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;
        self.publish(Change::Deleted { id, removed })?;
        Ok(removed)
    }

    /// Deletes every course after confirmation. Returns `false` if declined.
    pub fn clear(&mut self, confirm: &mut dyn Confirmer) -> GradebookResult<bool> {
        if !confirm.confirm(Prompt::ClearAll) {
            info!("event=courses_clear module=service status=skip reason=declined");
            return Ok(false);
        }
        let removed = self.records.len();
        self.records.clear();
        self.publish(Change::Cleared { removed })?;
        Ok(true)
    }

    /// Swaps the whole collection after confirmation.
    ///
    /// Returns the new record count, or `None` if declined.
    pub fn replace_all(
        &mut self,
        records: Vec<CourseRecord>,
        confirm: &mut dyn Confirmer,
    ) -> GradebookResult<Option<usize>> {
        let records = sanitize_collection(records);
        let prompt = Prompt::ReplaceWithImport {
            incoming: records.len(),
        };
        if !confirm.confirm(prompt) {
            info!("event=courses_replace module=service status=skip reason=declined");
            return Ok(None);
        }
        self.records = records;
        let count = self.records.len();
        self.publish(Change::Replaced { count })?;
        Ok(Some(count))
    }

    /// Parses, normalizes, and (after confirmation) installs an import.
    ///
    /// Parse failures are returned before the confirmer is consulted.
    pub fn import(
        &mut self,
        text: &str,
        confirm: &mut dyn Confirmer,
    ) -> GradebookResult<Option<usize>> {
        let records = parse_import(text).map_err(|err| {
            error!(
                "event=courses_import module=service status=error error_code=invalid_document error={}",
                err
            );
            err
        })?;
        self.replace_all(records, confirm)
    }

    /// Pretty-printed JSON of the collection in insertion order.
    pub fn export(&self) -> GradebookResult<String> {
        export_json(&self.records).map_err(GradebookError::Export)
    }

    /// Appends the demo courses after confirmation.
    ///
    /// Returns how many were added, or `None` if declined.
    pub fn load_demo(&mut self, confirm: &mut dyn Confirmer) -> GradebookResult<Option<usize>> {
        if !confirm.confirm(Prompt::AppendDemo) {
            info!("event=courses_demo module=service status=skip reason=declined");
            return Ok(None);
        }
        self.records.extend(
            DEMO_COURSES
                .iter()
                .map(|(name, credits, grade)| CourseRecord::new(name, *credits, *grade)),
        );
        let count = DEMO_COURSES.len();
        self.publish(Change::DemoAppended { count })?;
        Ok(Some(count))
    }

    /// Applies one sort-key selection and republishes the view.
    pub fn select_sort(&mut self, key: SortKey) -> GradebookResult<SortState> {
        self.sort.select(key);
        let state = self.sort;
        self.publish(Change::Resorted { state })?;
        Ok(state)
    }

    fn publish(&mut self, change: Change) -> GradebookResult<()> {
        let view = GradebookView::build(&self.records, self.sort, &*self.collator);
        debug!(
            "event=gradebook_change module=service change={} count={} observers={}",
            change.name(),
            view.stats.total_count,
            self.observers.len()
        );
        for observer in self.observers.iter_mut() {
            observer.on_change(&change, &view).map_err(|err| {
                error!(
                    "event=gradebook_change module=service status=error change={} error={}",
                    change.name(),
                    err
                );
                err
            })?;
        }
        Ok(())
    }
}
