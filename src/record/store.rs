//! # Record Store Contract
//!
//! Durable persistence of [`FileRecord`] rows. Every operation is a single
//! atomic database statement touching at most one row; the narrow accessors
//! (`size`, `created_on`, `updated_on`, `accessed_on`) exist so façade
//! accessors can keep their one-query-per-call contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::storage::errors::StorageResult;

use super::model::FileRecord;

/// Durable store of file records, keyed by unique name
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new row. Fails with `DuplicateName` if the name exists;
    /// callers pre-resolve uniqueness, so this is a defensive invariant.
    async fn create(&self, name: &str, content: &[u8]) -> StorageResult<FileRecord>;

    /// Fetch the full record, or `NotFound`
    async fn get(&self, name: &str) -> StorageResult<FileRecord>;

    /// Overwrite content and refresh `updated_on`, returning the new row
    async fn update_content(&self, name: &str, content: &[u8]) -> StorageResult<FileRecord>;

    /// Refresh `accessed_on` to now via one combined update-and-return
    /// statement, yielding the new timestamp. Tracking policy belongs to
    /// the façade; the store always touches.
    async fn touch_accessed(&self, name: &str) -> StorageResult<DateTime<Utc>>;

    /// Remove the row, or `NotFound` if absent
    async fn delete(&self, name: &str) -> StorageResult<()>;

    /// Whether a row exists under `name`
    async fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Byte length of the stored content
    async fn size(&self, name: &str) -> StorageResult<u64>;

    /// The row's creation timestamp
    async fn created_on(&self, name: &str) -> StorageResult<DateTime<Utc>>;

    /// The row's last content-update timestamp
    async fn updated_on(&self, name: &str) -> StorageResult<DateTime<Utc>>;

    /// The row's last tracked-access timestamp, if any
    async fn accessed_on(&self, name: &str) -> StorageResult<Option<DateTime<Utc>>>;
}
