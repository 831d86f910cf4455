//! Roster persistence contracts and backend implementations.
//!
//! # Responsibility
//! - Define the storage interface the roster service drives.
//! - Isolate backend details (SQL, document maps) from business logic.
//!
//! # Invariants
//! - One backend is selected at startup and never mixed per-record.
//! - Backends return semantic errors (`NotFound`) in addition to transport
//!   errors; callers decide whether a failure is surfaced or only logged.

use crate::db::DbError;
use crate::model::duty::{Duty, DutyId};
use crate::model::person::{Person, PersonId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

mod memory;
mod sqlite;

pub use memory::MemoryRosterStore;
pub use sqlite::SqliteRosterStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Which backend family a store belongs to.
///
/// Reported for status surfaces and logging; behavior differences (cascade
/// semantics, pre-sync update limits) live in the implementations themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Remote,
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Full roster state as loaded from or written to a backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub people: Vec<Person>,
    pub duties: Vec<Duty>,
}

/// Generic storage error for roster persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serde(serde_json::Error),
    NotFound(Uuid),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serde(err) => write!(f, "serialization failed: {err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted roster data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serde(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Storage interface for roster backends.
///
/// The service layer updates its in-memory state first and then calls into
/// this trait; a write failure is logged by the caller, not rolled back.
pub trait RosterStore {
    fn backend_kind(&self) -> BackendKind;

    /// Loads the full roster state.
    fn load(&self) -> StoreResult<RosterSnapshot>;

    fn insert_person(&mut self, person: &Person) -> StoreResult<()>;

    /// Persists the current state of one person (labels and assignments).
    fn update_person(&mut self, person: &Person) -> StoreResult<()>;

    fn delete_person(&mut self, id: PersonId) -> StoreResult<()>;

    fn insert_duty(&mut self, duty: &Duty) -> StoreResult<()>;

    /// Deletes one duty category. Returns how many assignment entries the
    /// backend cleared; the remote backend always reports zero because it
    /// leaves dangling references in place.
    fn delete_duty(&mut self, id: DutyId) -> StoreResult<usize>;

    /// Replaces the entire persisted state with `snapshot` (reset/restore).
    fn replace_all(&mut self, snapshot: &RosterSnapshot) -> StoreResult<()>;
}
