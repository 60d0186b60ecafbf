//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing is sorted by last name, then first name.
//! - Deleting an author cascades to its books (and their genre join rows)
//!   at the schema level.

use crate::model::author::Author;
use crate::model::AuthorId;
use crate::repo::{MutationOutcome, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    birth_date,
    country
FROM authors";

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    /// All authors, sorted by last name then first name.
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    /// One author by id.
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Persists a new author and returns its assigned id.
    fn add_author(&self, author: &Author) -> RepoResult<AuthorId>;
    /// Overwrites all mutable fields of an existing author.
    fn update_author(&self, author: &Author) -> RepoResult<MutationOutcome>;
    /// Removes an author; books referencing it are cascade-deleted.
    fn delete_author(&self, id: AuthorId) -> RepoResult<MutationOutcome>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self.conn.prepare(&format!(
            "{AUTHOR_SELECT_SQL}
             ORDER BY last_name COLLATE NOCASE ASC,
                      first_name COLLATE NOCASE ASC,
                      id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }
        Ok(None)
    }

    fn add_author(&self, author: &Author) -> RepoResult<AuthorId> {
        author.validate()?;

        self.conn.execute(
            "INSERT INTO authors (first_name, last_name, birth_date, country)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                author.first_name.as_str(),
                author.last_name.as_str(),
                author.birth_date,
                author.country.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_author(&self, author: &Author) -> RepoResult<MutationOutcome> {
        author.validate()?;

        let changed = self.conn.execute(
            "UPDATE authors
             SET
                first_name = ?1,
                last_name = ?2,
                birth_date = ?3,
                country = ?4
             WHERE id = ?5;",
            params![
                author.first_name.as_str(),
                author.last_name.as_str(),
                author.birth_date,
                author.country.as_str(),
                author.id,
            ],
        )?;

        Ok(outcome_from_changed(changed))
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<MutationOutcome> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;
        Ok(outcome_from_changed(changed))
    }
}

pub(crate) fn outcome_from_changed(changed: usize) -> MutationOutcome {
    if changed == 0 {
        MutationOutcome::NotFound
    } else {
        MutationOutcome::Applied
    }
}

pub(crate) fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let birth_date_text: String = row.get("birth_date")?;
    let birth_date = birth_date_text.parse().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{birth_date_text}` in authors.birth_date"
        ))
    })?;

    Ok(Author {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        birth_date,
        country: row.get("country")?,
    })
}
