//! CLI-specific error types
//!
//! All CLI errors are fatal: they abort the command and the process
//! exits non-zero.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O failure (bind, runtime, serving loop)
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Book store failure
    #[error("{0}")]
    Store(#[from] StoreError),
}
