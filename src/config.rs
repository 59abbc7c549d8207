//! # Configuration
//!
//! Explicit configuration structs passed at construction instead of ambient
//! global settings. Values come from a JSON file with serde defaults, with
//! `DBSTORAGE_*` environment variables taking precedence.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

/// Storage façade configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL files are served under (default: "/media/")
    #[serde(default = "default_media_url")]
    pub media_url: String,

    /// Whether reads refresh the accessed timestamp (default: false)
    #[serde(default)]
    pub track_accessed: bool,

    /// Database the record store uses (default: "sqlite://dbstorage.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

fn default_media_url() -> String {
    "/media/".to_string()
}

fn default_database_url() -> String {
    "sqlite://dbstorage.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_url: default_media_url(),
            track_accessed: false,
            database_url: default_database_url(),
        }
    }
}

impl StorageConfig {
    /// Override fields from `DBSTORAGE_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("DBSTORAGE_MEDIA_URL") {
            self.media_url = url;
        }
        if let Ok(flag) = std::env::var("DBSTORAGE_TRACK_ACCESSED") {
            self.track_accessed = matches!(flag.as_str(), "1" | "true" | "yes");
        }
        if let Ok(url) = std::env::var("DBSTORAGE_DATABASE_URL") {
            self.database_url = url;
        }
    }
}

/// Whole-process configuration: storage policy plus HTTP server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub http: HttpServerConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from file when present, defaults otherwise; environment
    /// overrides win in both cases.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.storage.apply_env();
        Ok(config)
    }
}
