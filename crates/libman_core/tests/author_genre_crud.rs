use chrono::NaiveDate;
use libman_core::db::open_db_in_memory;
use libman_core::{
    Author, AuthorRepository, Book, BookListQuery, BookRepository, Genre, GenreRepository,
    MutationOutcome, RepoError, SqliteAuthorRepository, SqliteBookRepository,
    SqliteGenreRepository,
};
use rusqlite::Connection;

fn birth(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn add_author(conn: &Connection, first_name: &str, last_name: &str) -> i64 {
    SqliteAuthorRepository::new(conn)
        .add_author(&Author::new(first_name, last_name, birth(1900, 1, 1), "Nowhere"))
        .unwrap()
}

#[test]
fn authors_are_listed_by_last_name_then_first_name() {
    let conn = open_db_in_memory().unwrap();
    add_author(&conn, "Fyodor", "Dostoevsky");
    add_author(&conn, "Leo", "Tolstoy");
    add_author(&conn, "Alexei", "Tolstoy");

    let repo = SqliteAuthorRepository::new(&conn);
    let names: Vec<String> = repo
        .list_authors()
        .unwrap()
        .into_iter()
        .map(|author| author.full_name())
        .collect();
    assert_eq!(names, vec!["Fyodor Dostoevsky", "Alexei Tolstoy", "Leo Tolstoy"]);
}

#[test]
fn author_roundtrip_preserves_birth_date_and_country() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let id = repo
        .add_author(&Author::new(
            "Arthur",
            "Conan Doyle",
            birth(1859, 5, 22),
            "United Kingdom",
        ))
        .unwrap();

    let loaded = repo.get_author(id).unwrap().unwrap();
    assert_eq!(loaded.birth_date, birth(1859, 5, 22));
    assert_eq!(loaded.country, "United Kingdom");
}

#[test]
fn update_author_overwrites_fields_and_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let mut author = Author::new("Leo", "Tolstoi", birth(1828, 9, 9), "Russia");
    author.id = repo.add_author(&author).unwrap();

    author.last_name = "Tolstoy".to_string();
    assert_eq!(
        repo.update_author(&author).unwrap(),
        MutationOutcome::Applied
    );
    let loaded = repo.get_author(author.id).unwrap().unwrap();
    assert_eq!(loaded.last_name, "Tolstoy");

    author.id += 100;
    assert_eq!(
        repo.update_author(&author).unwrap(),
        MutationOutcome::NotFound
    );
}

#[test]
fn deleting_author_cascades_to_their_books() {
    let mut conn = open_db_in_memory().unwrap();
    let tolstoy = add_author(&conn, "Leo", "Tolstoy");
    let doyle = add_author(&conn, "Arthur", "Conan Doyle");

    {
        let mut repo = SqliteBookRepository::new(&mut conn);
        repo.add_book(&Book::new("War and Peace", 1869, tolstoy), &[])
            .unwrap();
        repo.add_book(&Book::new("Anna Karenina", 1878, tolstoy), &[])
            .unwrap();
        repo.add_book(&Book::new("The Hound of the Baskervilles", 1902, doyle), &[])
            .unwrap();
    }

    {
        let repo = SqliteAuthorRepository::new(&conn);
        assert_eq!(
            repo.delete_author(tolstoy).unwrap(),
            MutationOutcome::Applied
        );
    }

    let repo = SqliteBookRepository::new(&mut conn);
    let remaining = repo.list_books(&BookListQuery::default()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].book.title, "The Hound of the Baskervilles");
}

#[test]
fn genres_are_listed_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGenreRepository::new(&conn);
    repo.add_genre(&Genre::new("Novel", None)).unwrap();
    repo.add_genre(&Genre::new("Detective", None)).unwrap();
    repo.add_genre(&Genre::new("Science Fiction", None)).unwrap();

    let names: Vec<String> = repo
        .list_genres()
        .unwrap()
        .into_iter()
        .map(|genre| genre.name)
        .collect();
    assert_eq!(names, vec!["Detective", "Novel", "Science Fiction"]);
}

#[test]
fn update_genre_overwrites_description_and_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGenreRepository::new(&conn);

    let mut genre = Genre::new("Novel", None);
    genre.id = repo.add_genre(&genre).unwrap();

    genre.description = Some("Long-form literary fiction".to_string());
    assert_eq!(repo.update_genre(&genre).unwrap(), MutationOutcome::Applied);
    let loaded = repo.get_genre(genre.id).unwrap().unwrap();
    assert_eq!(
        loaded.description.as_deref(),
        Some("Long-form literary fiction")
    );

    genre.id += 100;
    assert_eq!(repo.update_genre(&genre).unwrap(), MutationOutcome::NotFound);
}

#[test]
fn deleting_genre_removes_links_but_keeps_books() {
    let mut conn = open_db_in_memory().unwrap();
    let author_id = add_author(&conn, "Fyodor", "Dostoevsky");
    let (novel, detective) = {
        let repo = SqliteGenreRepository::new(&conn);
        (
            repo.add_genre(&Genre::new("Novel", None)).unwrap(),
            repo.add_genre(&Genre::new("Detective", None)).unwrap(),
        )
    };

    let book_id = {
        let mut repo = SqliteBookRepository::new(&mut conn);
        repo.add_book(
            &Book::new("Crime and Punishment", 1866, author_id),
            &[novel, detective],
        )
        .unwrap()
    };

    {
        let repo = SqliteGenreRepository::new(&conn);
        assert_eq!(
            repo.delete_genre(detective).unwrap(),
            MutationOutcome::Applied
        );
    }

    let repo = SqliteBookRepository::new(&mut conn);
    let record = repo.get_book(book_id).unwrap().unwrap();
    assert_eq!(record.book.title, "Crime and Punishment");
    assert_eq!(record.genre_ids(), vec![novel]);
}

#[test]
fn delete_missing_author_or_genre_is_tagged_not_found() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(
        SqliteAuthorRepository::new(&conn)
            .delete_author(424242)
            .unwrap(),
        MutationOutcome::NotFound
    );
    assert_eq!(
        SqliteGenreRepository::new(&conn)
            .delete_genre(424242)
            .unwrap(),
        MutationOutcome::NotFound
    );
}

#[test]
fn add_author_rejects_blank_fields_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);
    let err = repo
        .add_author(&Author::new("", "Tolstoy", birth(1828, 9, 9), "Russia"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}
