//! Book domain model and the eager read projection returned by queries.
//!
//! # Invariants
//! - A book always references exactly one author (`author_id`).
//! - Genre membership lives in join rows; `BookRecord` carries the attached
//!   genres sorted by name for display.

use super::{require_max_chars, require_non_blank, AuthorId, BookId, GenreId, ValidationError};
use crate::model::author::Author;
use crate::model::genre::Genre;
use serde::{Deserialize, Serialize};

/// Schema cap for `title`.
pub const BOOK_TITLE_MAX: usize = 200;
/// Schema cap for `isbn`. The ISBN format itself is not validated.
pub const BOOK_ISBN_MAX: usize = 20;

/// Persisted book fields. This is the write model accepted by
/// `add_book`/`update_book`; the attached author and genres are carried by
/// [`BookRecord`] on the read side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub isbn: Option<String>,
    pub publish_year: i32,
    pub quantity_in_stock: i64,
    pub author_id: AuthorId,
}

impl Book {
    /// Creates an unsaved book (`id == 0`) with zero stock.
    pub fn new(title: impl Into<String>, publish_year: i32, author_id: AuthorId) -> Self {
        Self {
            id: 0,
            title: title.into(),
            isbn: None,
            publish_year,
            quantity_in_stock: 0,
            author_id,
        }
    }

    /// Checks field constraints enforced by the schema.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("book", "title", &self.title)?;
        require_max_chars("book", "title", &self.title, BOOK_TITLE_MAX)?;
        if let Some(isbn) = self.isbn.as_deref() {
            require_max_chars("book", "isbn", isbn, BOOK_ISBN_MAX)?;
        }
        if self.quantity_in_stock < 0 {
            return Err(ValidationError::NegativeQuantity(self.quantity_in_stock));
        }
        Ok(())
    }
}

/// Read model for book list/detail use-cases: the book row with its author
/// and genres eagerly attached. Detached from storage once returned; local
/// mutation has no effect until saved through an update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub book: Book,
    pub author: Author,
    /// Attached genres, sorted by name.
    pub genres: Vec<Genre>,
}

impl BookRecord {
    /// Display name of the attached author.
    pub fn author_name(&self) -> String {
        self.author.full_name()
    }

    /// Ids of the attached genres, in name order.
    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres.iter().map(|genre| genre.id).collect()
    }

    /// Comma-joined genre names for display, or a placeholder when the book
    /// has no genres.
    pub fn genres_list(&self) -> String {
        if self.genres.is_empty() {
            return "No genres".to_string();
        }
        self.genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookRecord};
    use crate::model::author::Author;
    use crate::model::genre::Genre;
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    #[test]
    fn validate_rejects_negative_stock() {
        let mut book = Book::new("War and Peace", 1869, 1);
        book.quantity_in_stock = -1;
        assert_eq!(book.validate(), Err(ValidationError::NegativeQuantity(-1)));
    }

    #[test]
    fn validate_rejects_overlong_isbn() {
        let mut book = Book::new("War and Peace", 1869, 1);
        book.isbn = Some("9".repeat(21));
        assert!(matches!(
            book.validate(),
            Err(ValidationError::TooLong { field: "isbn", .. })
        ));
    }

    #[test]
    fn genres_list_joins_names_or_falls_back() {
        let author = Author::new(
            "Leo",
            "Tolstoy",
            NaiveDate::from_ymd_opt(1828, 9, 9).expect("valid date"),
            "Russia",
        );
        let mut record = BookRecord {
            book: Book::new("War and Peace", 1869, 1),
            author,
            genres: vec![],
        };
        assert_eq!(record.genres_list(), "No genres");

        record.genres = vec![
            Genre::new("Detective", None),
            Genre::new("Novel", None),
        ];
        assert_eq!(record.genres_list(), "Detective, Novel");
    }

    #[test]
    fn book_record_serializes_to_json() {
        let record = BookRecord {
            book: Book::new("The Idiot", 1869, 2),
            author: Author::new(
                "Fyodor",
                "Dostoevsky",
                NaiveDate::from_ymd_opt(1821, 11, 11).expect("valid date"),
                "Russia",
            ),
            genres: vec![Genre::new("Novel", None)],
        };
        let json = serde_json::to_string(&record).expect("record should serialize");
        assert!(json.contains("\"The Idiot\""));
        assert!(json.contains("1821-11-11"));
    }
}
