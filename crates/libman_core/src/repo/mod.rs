//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the catalog.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Repository writes must call `validate()` on the entity before any SQL
//!   mutation.
//! - Update/delete on a missing id is not an error: it returns
//!   [`MutationOutcome::NotFound`] and leaves the dataset unchanged.

use crate::db::DbError;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod book_repo;
pub mod genre_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Tagged result of an update or delete call.
///
/// The original silent no-op is kept in spirit (no error, no change), but
/// callers can now tell "nothing to do" from "target missing".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The target row existed and the mutation was committed.
    Applied,
    /// No row with the requested id; the dataset is unchanged.
    NotFound,
}

impl MutationOutcome {
    /// Convenience check for call sites that only care about success.
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Generic repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
