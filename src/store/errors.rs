//! # Store Errors
//!
//! Error types for the book store module.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Book store errors
///
/// Absence of a record is not an error: `get` returns `Option` and
/// `replace`/`remove` return `bool`. Errors here are unexpected
/// failures to read or write the database file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure (open, lock, I/O, constraint)
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
