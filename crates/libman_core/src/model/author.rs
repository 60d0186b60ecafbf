//! Author domain model.
//!
//! # Invariants
//! - First/last name and country are required and capped at 100 chars each,
//!   mirroring the schema CHECK constraints.
//! - `id == 0` means the author has not been persisted yet.

use super::{require_max_chars, require_non_blank, AuthorId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Schema cap for `first_name`, `last_name` and `country`.
pub const AUTHOR_TEXT_MAX: usize = 100;

/// A book author. Owns its books by back-reference only; deleting an author
/// cascades to every book referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub country: String,
}

impl Author {
    /// Creates an unsaved author (`id == 0`).
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            country: country.into(),
        }
    }

    /// Display name: trimmed `"{first} {last}"`, empty when both parts are
    /// blank.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Checks field constraints enforced by the schema.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("author", "first_name", &self.first_name)?;
        require_max_chars("author", "first_name", &self.first_name, AUTHOR_TEXT_MAX)?;
        require_non_blank("author", "last_name", &self.last_name)?;
        require_max_chars("author", "last_name", &self.last_name, AUTHOR_TEXT_MAX)?;
        require_non_blank("author", "country", &self.country)?;
        require_max_chars("author", "country", &self.country, AUTHOR_TEXT_MAX)?;
        Ok(())
    }
}
