//! Catalog facade exposed to presentation code.
//!
//! # Responsibility
//! - Initialize the database file (schema + seed) on first run.
//! - Expose the repository operations as self-contained calls.
//!
//! # Invariants
//! - Every method opens a fresh connection and releases it on every exit
//!   path; two calls never share a session.
//! - Entities returned to callers are plain data, detached from storage.

use crate::db::{open_db, seed_if_empty, DbError};
use crate::model::author::Author;
use crate::model::book::{Book, BookRecord};
use crate::model::genre::Genre;
use crate::model::{AuthorId, BookId, GenreId};
use crate::repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
use crate::repo::book_repo::{BookListQuery, BookRepository, SqliteBookRepository};
use crate::repo::genre_repo::{GenreRepository, SqliteGenreRepository};
use crate::repo::{MutationOutcome, RepoError};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error surface of [`LibraryService`].
#[derive(Debug)]
pub enum ServiceError {
    Db(DbError),
    Repo(RepoError),
    /// A write succeeded but the read-back found nothing.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent catalog state: {details}")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Sole entry point for presentation code. Holds only the database path;
/// every operation is an independent unit of work.
pub struct LibraryService {
    db_path: PathBuf,
}

impl LibraryService {
    /// Opens (creating if needed) the catalog at `path`: ensures the parent
    /// directory and schema exist and seeds the starter dataset when the
    /// store is empty. Fatal error when the directory or file cannot be
    /// created.
    pub fn initialize(path: impl Into<PathBuf>) -> ServiceResult<Self> {
        let db_path = path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut conn = open_db(&db_path)?;
        let seeded = seed_if_empty(&mut conn)?;
        info!(
            "event=catalog_init module=service status=ok path={} seeded={seeded}",
            db_path.display()
        );

        Ok(Self { db_path })
    }

    /// Initializes the catalog at the default per-user location.
    pub fn at_default_location() -> ServiceResult<Self> {
        let path = crate::db::default_db_path()?;
        Self::initialize(path)
    }

    /// The database file backing this service.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> ServiceResult<Connection> {
        Ok(open_db(&self.db_path)?)
    }

    /// Filtered books sorted by title, author and genres attached.
    pub fn books(&self, query: &BookListQuery) -> ServiceResult<Vec<BookRecord>> {
        let mut conn = self.connect()?;
        let repo = SqliteBookRepository::new(&mut conn);
        let records = repo.list_books(query)?;
        info!(
            "event=books_list module=service status=ok count={}",
            records.len()
        );
        Ok(records)
    }

    /// All authors, sorted by last name then first name.
    pub fn authors(&self) -> ServiceResult<Vec<Author>> {
        let conn = self.connect()?;
        let repo = SqliteAuthorRepository::new(&conn);
        Ok(repo.list_authors()?)
    }

    /// All genres, sorted by name.
    pub fn genres(&self) -> ServiceResult<Vec<Genre>> {
        let conn = self.connect()?;
        let repo = SqliteGenreRepository::new(&conn);
        Ok(repo.list_genres()?)
    }

    /// Persists a book with its genre links and returns the stored record
    /// with identity, author and genres attached.
    pub fn add_book(&self, book: &Book, genre_ids: &[GenreId]) -> ServiceResult<BookRecord> {
        let mut conn = self.connect()?;
        let mut repo = SqliteBookRepository::new(&mut conn);
        let book_id = repo.add_book(book, genre_ids)?;
        info!("event=book_add module=service status=ok book_id={book_id}");
        repo.get_book(book_id)?
            .ok_or(ServiceError::InconsistentState(
                "created book not found in read-back",
            ))
    }

    /// Overwrites a book and replaces its genre-link set.
    pub fn update_book(
        &self,
        book: &Book,
        genre_ids: &[GenreId],
    ) -> ServiceResult<MutationOutcome> {
        let mut conn = self.connect()?;
        let mut repo = SqliteBookRepository::new(&mut conn);
        let outcome = repo.update_book(book, genre_ids)?;
        info!(
            "event=book_update module=service status=ok book_id={} outcome={outcome:?}",
            book.id
        );
        Ok(outcome)
    }

    /// Removes a book and, via cascade, its genre links.
    pub fn delete_book(&self, id: BookId) -> ServiceResult<MutationOutcome> {
        let mut conn = self.connect()?;
        let repo = SqliteBookRepository::new(&mut conn);
        let outcome = repo.delete_book(id)?;
        info!("event=book_delete module=service status=ok book_id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Persists an author and returns it with its assigned identity.
    pub fn add_author(&self, author: &Author) -> ServiceResult<Author> {
        let conn = self.connect()?;
        let repo = SqliteAuthorRepository::new(&conn);
        let author_id = repo.add_author(author)?;
        info!("event=author_add module=service status=ok author_id={author_id}");
        repo.get_author(author_id)?
            .ok_or(ServiceError::InconsistentState(
                "created author not found in read-back",
            ))
    }

    /// Overwrites an author's fields.
    pub fn update_author(&self, author: &Author) -> ServiceResult<MutationOutcome> {
        let conn = self.connect()?;
        let repo = SqliteAuthorRepository::new(&conn);
        let outcome = repo.update_author(author)?;
        info!(
            "event=author_update module=service status=ok author_id={} outcome={outcome:?}",
            author.id
        );
        Ok(outcome)
    }

    /// Removes an author and, via cascade, all of their books.
    pub fn delete_author(&self, id: AuthorId) -> ServiceResult<MutationOutcome> {
        let conn = self.connect()?;
        let repo = SqliteAuthorRepository::new(&conn);
        let outcome = repo.delete_author(id)?;
        info!("event=author_delete module=service status=ok author_id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Persists a genre and returns it with its assigned identity.
    pub fn add_genre(&self, genre: &Genre) -> ServiceResult<Genre> {
        let conn = self.connect()?;
        let repo = SqliteGenreRepository::new(&conn);
        let genre_id = repo.add_genre(genre)?;
        info!("event=genre_add module=service status=ok genre_id={genre_id}");
        repo.get_genre(genre_id)?
            .ok_or(ServiceError::InconsistentState(
                "created genre not found in read-back",
            ))
    }

    /// Overwrites a genre's fields.
    pub fn update_genre(&self, genre: &Genre) -> ServiceResult<MutationOutcome> {
        let conn = self.connect()?;
        let repo = SqliteGenreRepository::new(&conn);
        let outcome = repo.update_genre(genre)?;
        info!(
            "event=genre_update module=service status=ok genre_id={} outcome={outcome:?}",
            genre.id
        );
        Ok(outcome)
    }

    /// Removes a genre; books keep their remaining genres.
    pub fn delete_genre(&self, id: GenreId) -> ServiceResult<MutationOutcome> {
        let conn = self.connect()?;
        let repo = SqliteGenreRepository::new(&conn);
        let outcome = repo.delete_genre(id)?;
        info!("event=genre_delete module=service status=ok genre_id={id} outcome={outcome:?}");
        Ok(outcome)
    }
}
