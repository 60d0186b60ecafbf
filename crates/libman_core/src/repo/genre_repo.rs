//! Genre repository contract and SQLite implementation.
//!
//! # Invariants
//! - Listing is sorted by name.
//! - Deleting a genre removes its join rows only; books survive with their
//!   remaining genres.

use crate::model::genre::Genre;
use crate::model::GenreId;
use crate::repo::author_repo::outcome_from_changed;
use crate::repo::{MutationOutcome, RepoResult};
use rusqlite::{params, Connection, Row};

const GENRE_SELECT_SQL: &str = "SELECT id, name, description FROM genres";

/// Repository interface for genre CRUD operations.
pub trait GenreRepository {
    /// All genres, sorted by name.
    fn list_genres(&self) -> RepoResult<Vec<Genre>>;
    /// One genre by id.
    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>>;
    /// Persists a new genre and returns its assigned id.
    fn add_genre(&self, genre: &Genre) -> RepoResult<GenreId>;
    /// Overwrites name and description of an existing genre.
    fn update_genre(&self, genre: &Genre) -> RepoResult<MutationOutcome>;
    /// Removes a genre; its book links are cascade-deleted.
    fn delete_genre(&self, id: GenreId) -> RepoResult<MutationOutcome>;
}

/// SQLite-backed genre repository.
pub struct SqliteGenreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn list_genres(&self) -> RepoResult<Vec<Genre>> {
        let mut stmt = self.conn.prepare(&format!(
            "{GENRE_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut genres = Vec::new();
        while let Some(row) = rows.next()? {
            genres.push(parse_genre_row(row)?);
        }
        Ok(genres)
    }

    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GENRE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_genre_row(row)?));
        }
        Ok(None)
    }

    fn add_genre(&self, genre: &Genre) -> RepoResult<GenreId> {
        genre.validate()?;

        self.conn.execute(
            "INSERT INTO genres (name, description) VALUES (?1, ?2);",
            params![genre.name.as_str(), genre.description.as_deref()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_genre(&self, genre: &Genre) -> RepoResult<MutationOutcome> {
        genre.validate()?;

        let changed = self.conn.execute(
            "UPDATE genres
             SET name = ?1, description = ?2
             WHERE id = ?3;",
            params![genre.name.as_str(), genre.description.as_deref(), genre.id],
        )?;

        Ok(outcome_from_changed(changed))
    }

    fn delete_genre(&self, id: GenreId) -> RepoResult<MutationOutcome> {
        let changed = self
            .conn
            .execute("DELETE FROM genres WHERE id = ?1;", [id])?;
        Ok(outcome_from_changed(changed))
    }
}

pub(crate) fn parse_genre_row(row: &Row<'_>) -> RepoResult<Genre> {
    Ok(Genre {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}
