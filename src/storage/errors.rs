//! # Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No record exists under the requested name
    #[error("File not found: {0}")]
    NotFound(String),

    /// Insert hit the unique key; a lost collision-resolution race
    #[error("Duplicate file name: {0}")]
    DuplicateName(String),

    /// Save was given no name and the content carries none
    #[error("No file name given and content has no name")]
    MissingName,

    /// Permanent capability gap, not a bug
    #[error("Operation not supported: {0}")]
    NotSupported(&'static str),

    /// Row-level invariant violation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(String),
}

impl StorageError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StorageError::NotFound(_) => 404,
            StorageError::DuplicateName(_) => 409,
            StorageError::MissingName => 400,
            StorageError::NotSupported(_) => 501,
            StorageError::InvalidRecord(_) => 500,
            StorageError::Database(_) => 500,
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StorageError::NotFound(String::new()),
            other => StorageError::Database(other.to_string()),
        }
    }
}
