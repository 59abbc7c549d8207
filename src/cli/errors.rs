//! CLI-specific error types
//!
//! All CLI errors are fatal; main prints them to stderr and exits non-zero.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),
}
