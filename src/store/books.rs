//! # Book Store Operations
//!
//! CRUD over the `books` table. Each operation opens a fresh
//! connection scoped to the call, so the handle is released on every
//! exit path, including errors.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::book::{Book, BookFields};
use super::errors::StoreResult;

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    publisher TEXT,
    price INTEGER NOT NULL,
    publish_date TEXT,
    isbn TEXT,
    cover_url TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const BOOK_COLUMNS: &str = "id, title, author, publisher, price, publish_date, isbn, cover_url, created_at";

/// SQLite-backed store for book records.
///
/// Holds only the database path. Connections are opened per
/// operation and dropped when the operation returns.
#[derive(Debug, Clone)]
pub struct BookStore {
    path: PathBuf,
}

impl BookStore {
    /// Create a store handle for the database at `path`.
    ///
    /// Does not touch the filesystem; call [`initialize`](Self::initialize)
    /// to create the file and schema.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> StoreResult<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Idempotently ensure the `books` table exists.
    ///
    /// Creates the backing file if absent. Safe to call on every boot.
    pub fn initialize(&self) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute(SCHEMA_SQL, [])?;
        Ok(())
    }

    /// List books ordered by ascending id.
    ///
    /// `skip` and `limit` pass through to `OFFSET`/`LIMIT` unchanged;
    /// no upper bound is enforced on `limit`.
    pub fn list(&self, skip: u32, limit: u32) -> StoreResult<Vec<Book>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM books ORDER BY id LIMIT ?1 OFFSET ?2",
            BOOK_COLUMNS
        ))?;
        let rows = stmt.query_map(params![limit, skip], row_to_book)?;
        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }

    /// Fetch a single book, or `None` if no record has that id.
    pub fn get(&self, id: i64) -> StoreResult<Option<Book>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM books WHERE id = ?1",
            BOOK_COLUMNS
        ))?;
        let book = stmt.query_row(params![id], row_to_book).optional()?;
        Ok(book)
    }

    /// Insert a new record and return its assigned id.
    ///
    /// The store assigns the id and `created_at`; neither is supplied
    /// by the caller.
    pub fn insert(&self, fields: &BookFields) -> StoreResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO books (title, author, publisher, price, publish_date, isbn, cover_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                fields.title,
                fields.author,
                fields.publisher,
                fields.price,
                fields.publish_date,
                fields.isbn,
                fields.cover_url,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Overwrite all mutable columns of the record at `id`.
    ///
    /// Returns `false` if no record has that id. `id` and `created_at`
    /// are never changed.
    pub fn replace(&self, id: i64, fields: &BookFields) -> StoreResult<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE books
             SET title = ?1, author = ?2, publisher = ?3, price = ?4,
                 publish_date = ?5, isbn = ?6, cover_url = ?7
             WHERE id = ?8",
            params![
                fields.title,
                fields.author,
                fields.publisher,
                fields.price,
                fields.publish_date,
                fields.isbn,
                fields.cover_url,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete the record at `id`. Returns `false` if it did not exist.
    pub fn remove(&self, id: i64) -> StoreResult<bool> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        publisher: row.get(3)?,
        price: row.get(4)?,
        publish_date: row.get(5)?,
        isbn: row.get(6)?,
        cover_url: row.get(7)?,
        created_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, BookStore) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = BookStore::new(dir.path().join("books.db"));
        store.initialize().unwrap();
        (dir, store)
    }

    fn dune() -> BookFields {
        BookFields {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            price: 999,
            publisher: None,
            publish_date: None,
            isbn: None,
            cover_url: None,
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_dir, store) = test_store();
        store.initialize().unwrap();
        store.initialize().unwrap();
    }

    #[test]
    fn test_insert_then_get_roundtrip() {
        let (_dir, store) = test_store();
        let id = store.insert(&dune()).unwrap();

        let book = store.get(id).unwrap().expect("inserted book must exist");
        assert_eq!(book.id, id);
        assert_eq!(book.fields(), dune());
    }

    #[test]
    fn test_insert_assigns_fresh_ids() {
        let (_dir, store) = test_store();
        let first = store.insert(&dune()).unwrap();
        let second = store.insert(&dune()).unwrap();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn test_get_missing_is_none() {
        let (_dir, store) = test_store();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn test_list_empty_table() {
        let (_dir, store) = test_store();
        assert!(store.list(0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_list_skip_and_limit() {
        let (_dir, store) = test_store();
        for _ in 0..5 {
            store.insert(&dune()).unwrap();
        }

        let page = store.list(1, 2).unwrap();
        let ids: Vec<i64> = page.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);

        // Skip past the end yields nothing.
        assert!(store.list(10, 10).unwrap().is_empty());
    }

    #[test]
    fn test_replace_overwrites_fields_only() {
        let (_dir, store) = test_store();
        let id = store.insert(&dune()).unwrap();
        let before = store.get(id).unwrap().unwrap();

        let mut updated = dune();
        updated.price = 1099;
        updated.publisher = Some("Ace".to_string());
        assert!(store.replace(id, &updated).unwrap());

        let after = store.get(id).unwrap().unwrap();
        assert_eq!(after.price, 1099);
        assert_eq!(after.publisher.as_deref(), Some("Ace"));
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_replace_missing_returns_false() {
        let (_dir, store) = test_store();
        assert!(!store.replace(42, &dune()).unwrap());
    }

    #[test]
    fn test_noop_replace_is_idempotent() {
        let (_dir, store) = test_store();
        let id = store.insert(&dune()).unwrap();
        let before = store.get(id).unwrap().unwrap();

        assert!(store.replace(id, &before.fields()).unwrap());
        let after = store.get(id).unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_remove_then_get_is_none() {
        let (_dir, store) = test_store();
        let id = store.insert(&dune()).unwrap();

        assert!(store.remove(id).unwrap());
        assert!(store.get(id).unwrap().is_none());
        // Removing again is not an error, just false.
        assert!(!store.remove(id).unwrap());
    }
}
