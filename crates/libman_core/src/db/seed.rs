//! Fixed starter dataset inserted when the catalog is empty.
//!
//! # Invariants
//! - Seeding runs only when the `authors` table has no rows, so it is
//!   idempotent across restarts.
//! - The whole dataset is inserted in one transaction.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection, Transaction};

/// Inserts the fixed reference data (3 genres, 3 authors, 5 books with
/// genre links) when no author rows exist. Returns whether seeding ran.
pub fn seed_if_empty(conn: &mut Connection) -> DbResult<bool> {
    let author_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))?;
    if author_count > 0 {
        return Ok(false);
    }

    let tx = conn.transaction()?;
    insert_seed_rows(&tx)?;
    tx.commit()?;

    info!("event=db_seed module=db status=ok genres=3 authors=3 books=5");
    Ok(true)
}

fn insert_seed_rows(tx: &Transaction<'_>) -> DbResult<()> {
    let genres = [
        ("Novel", "Long-form literary fiction"),
        ("Science Fiction", "Scientific and speculative fiction"),
        ("Detective", "Crime and detective stories"),
    ];
    let mut genre_ids = Vec::with_capacity(genres.len());
    for (name, description) in genres {
        tx.execute(
            "INSERT INTO genres (name, description) VALUES (?1, ?2);",
            params![name, description],
        )?;
        genre_ids.push(tx.last_insert_rowid());
    }

    let authors = [
        ("Leo", "Tolstoy", "1828-09-09", "Russia"),
        ("Fyodor", "Dostoevsky", "1821-11-11", "Russia"),
        ("Arthur", "Conan Doyle", "1859-05-22", "United Kingdom"),
    ];
    let mut author_ids = Vec::with_capacity(authors.len());
    for (first_name, last_name, birth_date, country) in authors {
        tx.execute(
            "INSERT INTO authors (first_name, last_name, birth_date, country)
             VALUES (?1, ?2, ?3, ?4);",
            params![first_name, last_name, birth_date, country],
        )?;
        author_ids.push(tx.last_insert_rowid());
    }

    // (title, isbn, year, quantity, author index, genre index)
    let books = [
        ("War and Peace", "978-5-17-019827-3", 1869, 5, 0, 0),
        ("Anna Karenina", "978-5-17-019828-0", 1878, 3, 0, 0),
        ("Crime and Punishment", "978-5-17-019829-7", 1866, 4, 1, 0),
        ("The Idiot", "978-5-17-019830-3", 1869, 2, 1, 0),
        ("The Hound of the Baskervilles", "978-5-17-019831-0", 1902, 7, 2, 2),
    ];
    for (title, isbn, publish_year, quantity, author_idx, genre_idx) in books {
        tx.execute(
            "INSERT INTO books (title, isbn, publish_year, quantity_in_stock, author_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                title,
                isbn,
                publish_year,
                quantity,
                author_ids[author_idx as usize]
            ],
        )?;
        tx.execute(
            "INSERT INTO book_genres (book_id, genre_id) VALUES (?1, ?2);",
            params![tx.last_insert_rowid(), genre_ids[genre_idx as usize]],
        )?;
    }

    Ok(())
}
