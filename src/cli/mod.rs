//! CLI module for dbstorage
//!
//! Provides command-line interface for:
//! - init: create the storage schema in the configured database
//! - serve: boot the file-serving HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, serve};
pub use errors::{CliError, CliResult};
