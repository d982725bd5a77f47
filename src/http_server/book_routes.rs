//! # Book HTTP Routes
//!
//! Endpoints for the catalog CRUD surface, plus the root banner and
//! health check.
//!
//! The create/update payload keeps a three-way distinction for the
//! nullable columns: field not sent (retain on update), field sent as
//! `null` (clear), and field sent with a value (replace). Updates are
//! an explicit read-modify-write: fetch the current record, substitute
//! the provided fields, write the full merged record back. Concurrent
//! updates to the same id race at that granularity; the last writer
//! wins.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{ApiError, ApiResult};
use crate::store::{Book, BookFields, BookStore};

// ==================
// Shared State
// ==================

/// State shared across book handlers
pub struct AppState {
    pub store: BookStore,
}

impl AppState {
    pub fn new(store: BookStore) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

/// Create/update request body. Every field is optional at the
/// transport boundary; which ones are mandatory depends on the
/// operation.
///
/// `title`, `author` and `price` are NOT NULL columns, so a `null` for
/// them carries no meaning beyond absence. The nullable columns use a
/// nested `Option` so that an explicit `null` (clear the value) can be
/// told apart from the field not being sent (retain the value).
#[derive(Debug, Default, Deserialize)]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub publisher: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub publish_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub isbn: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_url: Option<Option<String>>,
}

/// Deserialize a present field into `Some(inner)`, keeping `null` as
/// `Some(None)`. Absent fields fall back to the `None` field default.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl BookPayload {
    /// Field-level validation, independent of the operation.
    ///
    /// Runs before any storage call on both create and update paths.
    pub fn validate(&self) -> ApiResult<()> {
        if let Some(price) = self.price {
            if price <= 0 {
                return Err(ApiError::Validation("price must be > 0".to_string()));
            }
        }
        if let Some(title) = &self.title {
            if title.is_empty() {
                return Err(ApiError::Validation("title must not be empty".to_string()));
            }
        }
        if let Some(author) = &self.author {
            if author.is_empty() {
                return Err(ApiError::Validation("author must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Resolve the payload for a create, where `title`, `author` and
    /// `price` are mandatory.
    pub fn into_create_fields(self) -> ApiResult<BookFields> {
        let (Some(title), Some(author), Some(price)) = (self.title, self.author, self.price)
        else {
            return Err(ApiError::Validation(
                "title, author, price are required".to_string(),
            ));
        };

        Ok(BookFields {
            title,
            author,
            price,
            publisher: self.publisher.flatten(),
            publish_date: self.publish_date.flatten(),
            isbn: self.isbn.flatten(),
            cover_url: self.cover_url.flatten(),
        })
    }

    /// Merge this payload over the current record for a partial
    /// update. Fields not sent keep their stored value; nullable
    /// fields sent as `null` are cleared.
    pub fn merge_into(self, current: &Book) -> BookFields {
        BookFields {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            author: self.author.unwrap_or_else(|| current.author.clone()),
            price: self.price.unwrap_or(current.price),
            publisher: self.publisher.unwrap_or_else(|| current.publisher.clone()),
            publish_date: self
                .publish_date
                .unwrap_or_else(|| current.publish_date.clone()),
            isbn: self.isbn.unwrap_or_else(|| current.isbn.clone()),
            cover_url: self.cover_url.unwrap_or_else(|| current.cover_url.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ==================
// Routes
// ==================

/// Root banner and health check routes
pub fn root_routes() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

/// Create book CRUD routes
pub fn book_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler))
        .route("/books", post(create_book_handler))
        .route("/books/{id}", get(get_book_handler))
        .route("/books/{id}", put(update_book_handler))
        .route("/books/{id}", delete(delete_book_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Bokelai Books API".to_string(),
    })
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn list_books_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Book>>> {
    let books = state.store.list(query.skip, query.limit)?;
    Ok(Json(books))
}

async fn get_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Book>> {
    let book = state.store.get(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(book))
}

async fn create_book_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookPayload>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    payload.validate()?;
    let fields = payload.into_create_fields()?;

    let id = state.store.insert(&fields)?;
    let book = state
        .store
        .get(id)?
        .ok_or_else(|| ApiError::Internal("created book missing on read-back".to_string()))?;

    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<BookPayload>,
) -> ApiResult<Json<Book>> {
    payload.validate()?;

    // Read-modify-write: fetch, merge provided fields, write back whole.
    let current = state.store.get(id)?.ok_or(ApiError::NotFound)?;
    let merged = payload.merge_into(&current);

    if !state.store.replace(id, &merged)? {
        // Deleted between the read and the write.
        return Err(ApiError::NotFound);
    }

    let book = state.store.get(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(book))
}

async fn delete_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !state.store.remove(id)? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
