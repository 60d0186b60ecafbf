//! Genre domain model.

use super::{require_max_chars, require_non_blank, GenreId, ValidationError};
use serde::{Deserialize, Serialize};

/// Schema cap for `name`.
pub const GENRE_NAME_MAX: usize = 100;
/// Schema cap for `description`.
pub const GENRE_DESCRIPTION_MAX: usize = 500;

/// A book genre. Participates in a many-to-many relation with books via
/// `book_genres` join rows; deleting a genre removes its join rows only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub description: Option<String>,
}

impl Genre {
    /// Creates an unsaved genre (`id == 0`).
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description,
        }
    }

    /// Checks field constraints enforced by the schema.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("genre", "name", &self.name)?;
        require_max_chars("genre", "name", &self.name, GENRE_NAME_MAX)?;
        if let Some(description) = self.description.as_deref() {
            require_max_chars("genre", "description", description, GENRE_DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Genre;
    use crate::model::ValidationError;

    #[test]
    fn validate_accepts_missing_description() {
        let genre = Genre::new("Novel", None);
        assert_eq!(genre.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_overlong_description() {
        let genre = Genre::new("Novel", Some("d".repeat(501)));
        assert!(matches!(
            genre.validate(),
            Err(ValidationError::TooLong {
                field: "description",
                ..
            })
        ));
    }
}
