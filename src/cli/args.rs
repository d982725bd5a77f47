//! CLI argument definitions using clap
//!
//! Commands:
//! - bokelai init --config <path>
//! - bokelai start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bokelai - A small, self-hostable book catalog HTTP API
#[derive(Parser, Debug)]
#[command(name = "bokelai")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the book database file and schema
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./bokelai.json")]
        config: PathBuf,
    },

    /// Start the bokelai HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./bokelai.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_init_with_default_config() {
        let cli = Cli::try_parse_from(["bokelai", "init"]).unwrap();
        match cli.command {
            Command::Init { config } => assert_eq!(config, PathBuf::from("./bokelai.json")),
            _ => panic!("expected init command"),
        }
    }

    #[test]
    fn test_parse_start_with_config_path() {
        let cli = Cli::try_parse_from(["bokelai", "start", "--config", "/etc/bokelai.json"])
            .unwrap();
        match cli.command {
            Command::Start { config } => assert_eq!(config, PathBuf::from("/etc/bokelai.json")),
            _ => panic!("expected start command"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["bokelai"]).is_err());
    }
}
