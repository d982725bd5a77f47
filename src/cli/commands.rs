//! CLI command implementations
//!
//! `init` prepares the database file; `start` boots the tokio runtime
//! and runs the HTTP server until it is stopped.

use std::path::Path;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::BookStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch to the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Create the database file and the books table
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    let store = BookStore::new(&config.db_path);
    store.initialize()?;

    log::info!("initialized book database at {}", config.db_path.display());
    println!("Initialized book database at {}", config.db_path.display());
    Ok(())
}

/// Boot the system and serve HTTP until stopped
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    // Ensure the schema exists on every boot; initialize is idempotent.
    let store = BookStore::new(&config.db_path);
    store.initialize()?;

    let server = HttpServer::with_config(config);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;

    Ok(())
}

fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    HttpServerConfig::load(path)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("books.db");
        let config_path = dir.path().join("bokelai.json");
        fs::write(
            &config_path,
            format!(r#"{{"db_path": "{}"}}"#, db_path.display()),
        )
        .unwrap();

        init(&config_path).unwrap();
        assert!(db_path.exists());

        // Re-running init against an existing database is fine.
        init(&config_path).unwrap();
    }

    #[test]
    fn test_malformed_config_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bokelai.json");
        fs::write(&config_path, "not json").unwrap();

        match init(&config_path) {
            Err(CliError::Config(_)) => {}
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
