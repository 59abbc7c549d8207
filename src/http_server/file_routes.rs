//! # File Serving Routes
//!
//! The single inbound entry point: serve a stored file by name. Looks up
//! the record, marks the access when tracking is enabled, and streams the
//! bytes back with a sniffed content type.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::debug;

use crate::record::SqliteRecordStore;
use crate::storage::{DbFileStorage, StorageError};

// ==================
// Shared State
// ==================

/// File storage state shared across handlers
pub struct FileStorageState {
    pub storage: DbFileStorage<SqliteRecordStore>,
}

impl FileStorageState {
    pub fn new(storage: DbFileStorage<SqliteRecordStore>) -> Self {
        Self { storage }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

// ==================
// File Routes
// ==================

/// Create file-serving routes
pub fn file_routes(state: Arc<FileStorageState>) -> Router {
    Router::new()
        .route("/files/*name", get(serve_file_handler))
        .with_state(state)
}

fn error_response(e: StorageError) -> (StatusCode, Json<ErrorResponse>) {
    let code = e.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse {
            error: e.to_string(),
            code,
        }),
    )
}

/// Sniff a content type from the leading bytes, octet-stream when unknown
fn content_type_of(data: &[u8]) -> &'static str {
    infer::get(data)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream")
}

// ==================
// Handlers
// ==================

async fn serve_file_handler(
    State(state): State<Arc<FileStorageState>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, HeaderMap, Bytes), (StatusCode, Json<ErrorResponse>)> {
    let file = state.storage.open(&name).await.map_err(error_response)?;
    state
        .storage
        .mark_accessed(&name)
        .await
        .map_err(error_response)?;

    debug!(name = %name, size = file.read().len(), "serving file");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_of(file.read())),
    );
    headers.insert(
        header::CONTENT_LENGTH,
        HeaderValue::from(file.read().len() as u64),
    );

    Ok((StatusCode::OK, headers, Bytes::from(file.into_bytes())))
}
