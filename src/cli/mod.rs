//! CLI module for bokelai
//!
//! Provides command-line interface for:
//! - init: Create the database file and schema
//! - start: Boot the HTTP server and enter the serving loop

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, start};
pub use errors::{CliError, CliResult};
