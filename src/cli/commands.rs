//! CLI command implementations
//!
//! `init` bootstraps the schema in the configured database; `serve` boots
//! the HTTP serving layer over it. Both load the same JSON config with
//! `DBSTORAGE_*` environment overrides.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::http_server::{FileStorageState, HttpServer};
use crate::record::SqliteRecordStore;
use crate::storage::DbFileStorage;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch to the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the storage schema in the configured database
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::load_or_default(config_path)?;
    let runtime = runtime()?;
    runtime.block_on(async {
        let store = SqliteRecordStore::connect(&config.storage.database_url).await?;
        store.init_schema().await
    })?;
    println!("Initialized storage schema in {}", config.storage.database_url);
    Ok(())
}

/// Boot the file-serving HTTP server
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = AppConfig::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let runtime = runtime()?;
    runtime.block_on(async {
        let store = SqliteRecordStore::connect(&config.storage.database_url).await?;
        store.init_schema().await?;

        let storage = DbFileStorage::new(store, &config.storage);
        let state = Arc::new(FileStorageState::new(storage));
        let server = HttpServer::new(config.http.clone(), state);
        server.start().await.map_err(CliError::from)
    })
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))
}
