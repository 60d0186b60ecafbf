//! Core of the libman library-catalog manager: persistence, repositories
//! and filtered search over books, authors and genres. Presentation code
//! consumes this crate and holds no storage state of its own.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::Author;
pub use model::book::{Book, BookRecord};
pub use model::genre::Genre;
pub use model::{AuthorId, BookId, GenreId, ValidationError};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookListQuery, BookRepository, SqliteBookRepository};
pub use repo::genre_repo::{GenreRepository, SqliteGenreRepository};
pub use repo::{MutationOutcome, RepoError, RepoResult};
pub use service::library_service::{LibraryService, ServiceError, ServiceResult};
