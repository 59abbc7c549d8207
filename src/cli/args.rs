//! CLI argument definitions using clap
//!
//! Commands:
//! - dbstorage init --config <path>
//! - dbstorage serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dbstorage - a database-backed file storage server
#[derive(Parser, Debug)]
#[command(name = "dbstorage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the storage schema in the configured database
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./dbstorage.json")]
        config: PathBuf,
    },

    /// Start the file-serving HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./dbstorage.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
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
    fn test_parse_init() {
        let cli = Cli::parse_from(["dbstorage", "init", "--config", "/tmp/c.json"]);
        assert!(matches!(cli.command, Command::Init { .. }));
    }

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::parse_from(["dbstorage", "serve", "--port", "9000"]);
        match cli.command {
            Command::Serve { port, config } => {
                assert_eq!(port, Some(9000));
                assert_eq!(config, PathBuf::from("./dbstorage.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
