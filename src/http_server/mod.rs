//! # HTTP Server
//!
//! The HTTP surface of the catalog: router construction, request
//! validation, response shaping, and the error-to-status mapping.

mod book_routes;
mod config;
mod errors;
mod server;

pub use book_routes::{book_routes, root_routes, AppState, BookPayload};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
