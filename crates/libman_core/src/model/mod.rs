//! Domain model for the library catalog.
//!
//! # Responsibility
//! - Define the canonical Author/Genre/Book shapes persisted by the core.
//! - Enforce field-level constraints before any SQL write via `validate()`.
//!
//! # Invariants
//! - Every entity is identified by a stable surrogate `i64` id; `0` marks a
//!   record that has not been persisted yet.
//! - Every book references exactly one author; genre membership is carried
//!   by join rows, never inline.

pub mod author;
pub mod book;
pub mod genre;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable surrogate id for authors.
pub type AuthorId = i64;
/// Stable surrogate id for books.
pub type BookId = i64;
/// Stable surrogate id for genres.
pub type GenreId = i64;

/// Field-level constraint violation detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required string field is empty or whitespace-only.
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    /// A string field exceeds its schema length cap.
    TooLong {
        entity: &'static str,
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Stock quantity below zero.
    NegativeQuantity(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { entity, field } => {
                write!(f, "{entity}.{field} is required")
            }
            Self::TooLong {
                entity,
                field,
                max,
                actual,
            } => write!(f, "{entity}.{field} is {actual} chars long, max is {max}"),
            Self::NegativeQuantity(value) => {
                write!(f, "book.quantity_in_stock cannot be negative, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_non_blank(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_max_chars(
    entity: &'static str,
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            entity,
            field,
            max,
            actual,
        });
    }
    Ok(())
}
