//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide book CRUD with the author and genres eagerly attached.
//! - Own genre-link replacement for updates (delete-all-then-reinsert in a
//!   single transaction).
//! - Compose the conjunctive title/author/genre list filter.
//!
//! # Invariants
//! - Book lists are always sorted by title ascending (case-insensitive,
//!   id as tie-break).
//! - `update_book` replaces the entire genre-link set, never diffs it.
//! - A filter input that is empty/default adds no predicate.

use crate::model::author::Author;
use crate::model::book::{Book, BookRecord};
use crate::model::genre::Genre;
use crate::model::{AuthorId, BookId, GenreId};
use crate::repo::author_repo::outcome_from_changed;
use crate::repo::genre_repo::parse_genre_row;
use crate::repo::{MutationOutcome, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

const BOOK_SELECT_SQL: &str = "SELECT
    b.id,
    b.title,
    b.isbn,
    b.publish_year,
    b.quantity_in_stock,
    b.author_id,
    a.first_name AS author_first_name,
    a.last_name AS author_last_name,
    a.birth_date AS author_birth_date,
    a.country AS author_country
FROM books b
INNER JOIN authors a ON a.id = b.author_id";

/// Optional, conjunctive filters for book listing.
///
/// Each field adds a predicate only when it is non-empty/non-default:
/// a blank title or a non-positive author id imposes no restriction, and an
/// empty genre list matches every book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookListQuery {
    /// Case-insensitive substring match against the title, trimmed first.
    pub title: Option<String>,
    /// Exact author match, applied only when the id is positive.
    pub author_id: Option<AuthorId>,
    /// Books having at least one of these genres (OR within the list).
    pub genre_ids: Vec<GenreId>,
}

impl BookListQuery {
    /// Filter by title substring only.
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Repository interface for book CRUD and filtered listing.
pub trait BookRepository {
    /// Filtered books sorted by title, author and genres attached.
    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<BookRecord>>;
    /// One book by id, author and genres attached.
    fn get_book(&self, id: BookId) -> RepoResult<Option<BookRecord>>;
    /// Persists a book plus one genre link per id, in one transaction.
    /// Returns the assigned book id.
    fn add_book(&mut self, book: &Book, genre_ids: &[GenreId]) -> RepoResult<BookId>;
    /// Overwrites all mutable fields and replaces the whole genre-link set.
    fn update_book(&mut self, book: &Book, genre_ids: &[GenreId]) -> RepoResult<MutationOutcome>;
    /// Removes a book; its genre links are cascade-deleted.
    fn delete_book(&self, id: BookId) -> RepoResult<MutationOutcome>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<BookRecord>> {
        let mut sql = format!("{BOOK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(pattern) = query.title.as_deref().and_then(like_pattern) {
            sql.push_str(" AND b.title LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(pattern));
        }

        if let Some(author_id) = query.author_id.filter(|id| *id > 0) {
            sql.push_str(" AND b.author_id = ?");
            bind_values.push(Value::Integer(author_id));
        }

        if !query.genre_ids.is_empty() {
            let placeholders = vec!["?"; query.genre_ids.len()].join(", ");
            sql.push_str(&format!(
                " AND EXISTS (
                    SELECT 1
                    FROM book_genres bg
                    WHERE bg.book_id = b.id
                      AND bg.genre_id IN ({placeholders})
                )"
            ));
            for genre_id in &query.genre_ids {
                bind_values.push(Value::Integer(*genre_id));
            }
        }

        sql.push_str(" ORDER BY b.title COLLATE NOCASE ASC, b.id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let (book, author) = parse_book_row(row)?;
            let genres = load_genres_for_book(self.conn, book.id)?;
            records.push(BookRecord {
                book,
                author,
                genres,
            });
        }

        Ok(records)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<BookRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE b.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            let (book, author) = parse_book_row(row)?;
            let genres = load_genres_for_book(self.conn, book.id)?;
            return Ok(Some(BookRecord {
                book,
                author,
                genres,
            }));
        }
        Ok(None)
    }

    fn add_book(&mut self, book: &Book, genre_ids: &[GenreId]) -> RepoResult<BookId> {
        book.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO books (title, isbn, publish_year, quantity_in_stock, author_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                book.title.as_str(),
                book.isbn.as_deref(),
                book.publish_year,
                book.quantity_in_stock,
                book.author_id,
            ],
        )?;
        let book_id = tx.last_insert_rowid();

        insert_genre_links(&tx, book_id, genre_ids)?;
        tx.commit()?;

        Ok(book_id)
    }

    fn update_book(&mut self, book: &Book, genre_ids: &[GenreId]) -> RepoResult<MutationOutcome> {
        book.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE books
             SET
                title = ?1,
                isbn = ?2,
                publish_year = ?3,
                quantity_in_stock = ?4,
                author_id = ?5
             WHERE id = ?6;",
            params![
                book.title.as_str(),
                book.isbn.as_deref(),
                book.publish_year,
                book.quantity_in_stock,
                book.author_id,
                book.id,
            ],
        )?;

        if changed == 0 {
            // Dropping the transaction rolls back; nothing was touched.
            return Ok(MutationOutcome::NotFound);
        }

        tx.execute("DELETE FROM book_genres WHERE book_id = ?1;", [book.id])?;
        insert_genre_links(&tx, book.id, genre_ids)?;
        tx.commit()?;

        Ok(MutationOutcome::Applied)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<MutationOutcome> {
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        Ok(outcome_from_changed(changed))
    }
}

/// Wraps a trimmed, non-blank search string into an escaped `LIKE` pattern.
/// Returns `None` when the input is blank (no predicate).
fn like_pattern(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut escaped = String::with_capacity(trimmed.len() + 2);
    escaped.push('%');
    for ch in trimmed.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    Some(escaped)
}

fn insert_genre_links(
    tx: &rusqlite::Transaction<'_>,
    book_id: BookId,
    genre_ids: &[GenreId],
) -> RepoResult<()> {
    for genre_id in genre_ids {
        tx.execute(
            "INSERT OR IGNORE INTO book_genres (book_id, genre_id) VALUES (?1, ?2);",
            params![book_id, genre_id],
        )?;
    }
    Ok(())
}

fn load_genres_for_book(conn: &Connection, book_id: BookId) -> RepoResult<Vec<Genre>> {
    let mut stmt = conn.prepare(
        "SELECT g.id, g.name, g.description
         FROM book_genres bg
         INNER JOIN genres g ON g.id = bg.genre_id
         WHERE bg.book_id = ?1
         ORDER BY g.name COLLATE NOCASE ASC, g.id ASC;",
    )?;
    let mut rows = stmt.query([book_id])?;
    let mut genres = Vec::new();
    while let Some(row) = rows.next()? {
        genres.push(parse_genre_row(row)?);
    }
    Ok(genres)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<(Book, Author)> {
    let birth_date_text: String = row.get("author_birth_date")?;
    let birth_date = birth_date_text.parse().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{birth_date_text}` in authors.birth_date"
        ))
    })?;

    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        isbn: row.get("isbn")?,
        publish_year: row.get("publish_year")?,
        quantity_in_stock: row.get("quantity_in_stock")?,
        author_id: row.get("author_id")?,
    };
    let author = Author {
        id: book.author_id,
        first_name: row.get("author_first_name")?,
        last_name: row.get("author_last_name")?,
        birth_date,
        country: row.get("author_country")?,
    };
    Ok((book, author))
}
