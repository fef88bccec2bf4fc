//! Durable key-value persistence for the course collection.
//!
//! # Responsibility
//! - Define the string-keyed store contract (`KeyValueStore`).
//! - Keep SQL details inside `SqliteKeyValueStore`.
//! - Map the course collection onto one versioned key (`CourseStorage`).
//!
//! # Invariants
//! - `set` overwrites any previous value under the same key.
//! - Reads of the course key never fail upward; bad data loads as empty.

mod course_storage;
mod sqlite_kv;

pub use course_storage::{CourseStorage, STORAGE_KEY};
pub use sqlite_kv::SqliteKeyValueStore;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by key-value persistence.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(_) => write!(f, "key-value store access failed"),
            Self::Serialize(_) => write!(f, "failed to serialize courses"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// String-keyed durable store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}
