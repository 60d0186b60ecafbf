use libman_core::db::migrations::latest_version;
use libman_core::db::{open_db, open_db_in_memory, seed_if_empty, DbError};
use libman_core::{BookListQuery, BookRepository, SqliteBookRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "authors");
    assert_table_exists(&conn, "genres");
    assert_table_exists(&conn, "books");
    assert_table_exists(&conn, "book_genres");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "books");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn seed_inserts_fixed_reference_data_once() {
    let mut conn = open_db_in_memory().unwrap();

    assert!(seed_if_empty(&mut conn).unwrap());
    assert_eq!(count(&conn, "genres"), 3);
    assert_eq!(count(&conn, "authors"), 3);
    assert_eq!(count(&conn, "books"), 5);
    assert_eq!(count(&conn, "book_genres"), 5);

    // A second pass against the populated store adds nothing.
    assert!(!seed_if_empty(&mut conn).unwrap());
    assert_eq!(count(&conn, "genres"), 3);
    assert_eq!(count(&conn, "authors"), 3);
    assert_eq!(count(&conn, "books"), 5);
}

#[test]
fn seeded_books_carry_their_authors_and_genres() {
    let mut conn = open_db_in_memory().unwrap();
    seed_if_empty(&mut conn).unwrap();

    let repo = SqliteBookRepository::new(&mut conn);

    let war = repo.list_books(&BookListQuery::by_title("War")).unwrap();
    assert_eq!(war.len(), 1);
    assert_eq!(war[0].book.title, "War and Peace");
    assert_eq!(war[0].author_name(), "Leo Tolstoy");
    assert_eq!(war[0].book.quantity_in_stock, 5);
    assert_eq!(war[0].genres_list(), "Novel");

    let hound = repo.list_books(&BookListQuery::by_title("hound")).unwrap();
    assert_eq!(hound.len(), 1);
    assert_eq!(hound[0].author_name(), "Arthur Conan Doyle");
    assert_eq!(hound[0].genres_list(), "Detective");
}

#[test]
fn seed_respects_preexisting_authors() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (first_name, last_name, birth_date, country)
         VALUES ('Test', 'Author', '1970-01-01', 'Testland');",
        [],
    )
    .unwrap();

    assert!(!seed_if_empty(&mut conn).unwrap());
    assert_eq!(count(&conn, "authors"), 1);
    assert_eq!(count(&conn, "books"), 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table `{table}` should exist");
}
