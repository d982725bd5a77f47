//! # Book Store
//!
//! SQLite-backed persistence for the book catalog.
//!
//! Every operation opens its own connection and drops it on return;
//! there is no pooling and no long-lived shared handle. SQLite itself
//! serializes writes to the backing file.

mod book;
mod books;
mod errors;

pub use book::{Book, BookFields};
pub use books::BookStore;
pub use errors::{StoreError, StoreResult};
