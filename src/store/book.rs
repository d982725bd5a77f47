//! # Book Record
//!
//! The persisted catalog entity and the set of mutable fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored book record.
///
/// `id` and `created_at` are assigned by the store on insert and never
/// change afterwards. Nullable columns serialize as `null`, so every
/// key is always present in a JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub price: i64,
    pub publish_date: Option<String>,
    pub isbn: Option<String>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The mutable columns of a book row.
///
/// Used as the input to `insert` and `replace`; everything except
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub price: i64,
    pub publisher: Option<String>,
    pub publish_date: Option<String>,
    pub isbn: Option<String>,
    pub cover_url: Option<String>,
}

impl Book {
    /// The mutable fields of this record, for read-modify-write updates.
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            publisher: self.publisher.clone(),
            publish_date: self.publish_date.clone(),
            isbn: self.isbn.clone(),
            cover_url: self.cover_url.clone(),
        }
    }
}
