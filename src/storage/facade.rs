//! # Storage Façade
//!
//! The public storage contract over a [`RecordStore`]: naming, URL, and
//! timestamp policy. Holds no cached state; every accessor performs exactly
//! one fresh store call, which is a testable contract, not an accident.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::StorageConfig;
use crate::record::RecordStore;

use super::content::{ContentSource, StoredFile};
use super::errors::{StorageError, StorageResult};
use super::name::{alternative_name, random_suffix, valid_name};
use super::url::{ensure_trailing_slash, file_url};

/// Database-backed file storage
///
/// Generic over the record store so policy (naming, URLs, access tracking)
/// stays independent of the persistence backend.
pub struct DbFileStorage<S: RecordStore> {
    store: S,
    base_url: String,
    track_accessed: bool,
}

impl<S: RecordStore> DbFileStorage<S> {
    /// Create a storage façade using the configured media URL as base
    pub fn new(store: S, config: &StorageConfig) -> Self {
        Self {
            store,
            base_url: ensure_trailing_slash(&config.media_url),
            track_accessed: config.track_accessed,
        }
    }

    /// Create a storage façade with an explicit base URL
    ///
    /// A base without a trailing separator gains exactly one.
    pub fn with_base_url(store: S, config: &StorageConfig, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: ensure_trailing_slash(&base_url.into()),
            track_accessed: config.track_accessed,
        }
    }

    /// The slash-terminated base URL used by [`url`](Self::url)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether reads refresh the accessed timestamp
    pub fn tracks_accessed(&self) -> bool {
        self.track_accessed
    }

    /// Access to the underlying record store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Truncate a requested name to the storage limit of 255 characters.
    ///
    /// Characters that are unsafe in URLs are kept; they are escaped at
    /// URL-generation time only.
    pub fn get_valid_name(&self, name: &str) -> String {
        valid_name(name)
    }

    /// Persist content under `name`, or under the content's intrinsic name
    /// when no name is given.
    ///
    /// A colliding name never overwrites: an alternative name with a random
    /// suffix before the extension is generated and retried until the insert
    /// succeeds. Returns the final, possibly-altered name; callers must use
    /// it for subsequent access. Concurrent savers racing on the same name
    /// are absorbed by retrying when the insert reports a duplicate.
    pub async fn save<C: ContentSource>(
        &self,
        name: Option<&str>,
        content: &C,
    ) -> StorageResult<String> {
        let requested = name
            .or_else(|| content.file_name())
            .ok_or(StorageError::MissingName)?;
        let mut candidate = self.get_valid_name(requested);

        loop {
            if self.store.exists(&candidate).await? {
                candidate = alternative_name(&candidate, &random_suffix());
                continue;
            }
            match self.store.create(&candidate, content.bytes()).await {
                Ok(_) => {
                    debug!(name = %candidate, size = content.len(), "saved file");
                    return Ok(candidate);
                }
                // Lost the race between the exists check and the insert
                Err(StorageError::DuplicateName(_)) => {
                    candidate = alternative_name(&candidate, &random_suffix());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Open a stored file, returning its full buffered content
    pub async fn open(&self, name: &str) -> StorageResult<StoredFile> {
        let record = self.store.get(name).await?;
        Ok(StoredFile::from(record))
    }

    /// Whether a record exists under `name`; no side effects
    pub async fn exists(&self, name: &str) -> StorageResult<bool> {
        self.store.exists(name).await
    }

    /// Delete a stored file. Missing names are a silent no-op.
    pub async fn delete(&self, name: &str) -> StorageResult<()> {
        match self.store.delete(name).await {
            Ok(()) => {
                debug!(name = %name, "deleted file");
                Ok(())
            }
            Err(StorageError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Byte length of the stored content
    pub async fn size(&self, name: &str) -> StorageResult<u64> {
        self.store.size(name).await
    }

    /// The serving URL for a stored name, with URL-unsafe characters
    /// percent-encoded. Performs no database query.
    pub fn url(&self, name: &str) -> String {
        file_url(&self.base_url, name)
    }

    /// When the record was first created
    pub async fn created_time(&self, name: &str) -> StorageResult<DateTime<Utc>> {
        self.store.created_on(name).await
    }

    /// When the content was last written
    pub async fn modified_time(&self, name: &str) -> StorageResult<DateTime<Utc>> {
        self.store.updated_on(name).await
    }

    /// When the file was last accessed, or `None` if never.
    ///
    /// With access tracking enabled this call itself counts as an access:
    /// the timestamp is refreshed and returned by one combined
    /// update-and-return statement. With tracking disabled the stored value
    /// is returned unchanged. Both branches are exactly one round trip.
    pub async fn accessed_time(&self, name: &str) -> StorageResult<Option<DateTime<Utc>>> {
        if self.track_accessed {
            Ok(Some(self.store.touch_accessed(name).await?))
        } else {
            self.store.accessed_on(name).await
        }
    }

    /// Record that a read-serving request accessed `name`.
    ///
    /// No-op when access tracking is disabled.
    pub async fn mark_accessed(&self, name: &str) -> StorageResult<()> {
        if self.track_accessed {
            self.store.touch_accessed(name).await?;
        }
        Ok(())
    }

    /// Local filesystem paths do not exist for database-backed storage
    pub fn path(&self, _name: &str) -> StorageResult<String> {
        Err(StorageError::NotSupported("path"))
    }

    /// Directory listings do not exist for database-backed storage
    pub fn listdir(&self, _name: &str) -> StorageResult<(Vec<String>, Vec<String>)> {
        Err(StorageError::NotSupported("listdir"))
    }
}
