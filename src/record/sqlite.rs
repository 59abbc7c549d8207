//! # SQLite Record Store
//!
//! sqlx-backed implementation of [`RecordStore`] against a single configured
//! SQLite database. One logical table, one row per stored file; every
//! operation is one SQL statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::storage::errors::{StorageError, StorageResult};

use super::model::{from_micros, to_micros, FileRecord};
use super::store::RecordStore;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS db_file (
    name        TEXT PRIMARY KEY CHECK (length(name) <= 255),
    content     BLOB NOT NULL,
    created_on  INTEGER NOT NULL,
    updated_on  INTEGER NOT NULL,
    accessed_on INTEGER
)";

/// Record store over a single SQLite database
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

/// Raw row shape; timestamps are UTC microseconds
#[derive(sqlx::FromRow)]
struct FileRow {
    name: String,
    content: Vec<u8>,
    created_on: i64,
    updated_on: i64,
    accessed_on: Option<i64>,
}

impl From<FileRow> for FileRecord {
    fn from(row: FileRow) -> Self {
        FileRecord {
            name: row.name,
            content: row.content,
            created_on: from_micros(row.created_on),
            updated_on: from_micros(row.updated_on),
            accessed_on: row.accessed_on.map(from_micros),
        }
    }
}

impl SqliteRecordStore {
    /// Wrap an existing connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the configured database, creating the file if missing.
    ///
    /// A single connection keeps one coherent store for in-memory databases,
    /// which exist per connection.
    pub async fn connect(url: &str) -> StorageResult<Self> {
        let options = url
            .parse::<SqliteConnectOptions>()?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the file table if it does not exist
    pub async fn init_schema(&self) -> StorageResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn create(&self, name: &str, content: &[u8]) -> StorageResult<FileRecord> {
        let record = FileRecord::new(name, content.to_vec());
        record.validate()?;

        let result = sqlx::query(
            "INSERT INTO db_file (name, content, created_on, updated_on) VALUES (?1, ?2, ?3, ?3)",
        )
        .bind(&record.name)
        .bind(&record.content)
        .bind(to_micros(record.created_on))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StorageError::DuplicateName(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, name: &str) -> StorageResult<FileRecord> {
        let row = sqlx::query_as::<_, FileRow>(
            "SELECT name, content, created_on, updated_on, accessed_on \
             FROM db_file WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(FileRecord::from)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn update_content(&self, name: &str, content: &[u8]) -> StorageResult<FileRecord> {
        let row = sqlx::query_as::<_, FileRow>(
            "UPDATE db_file SET content = ?2, updated_on = ?3 WHERE name = ?1 \
             RETURNING name, content, created_on, updated_on, accessed_on",
        )
        .bind(name)
        .bind(content)
        .bind(to_micros(Utc::now()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(FileRecord::from)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn touch_accessed(&self, name: &str) -> StorageResult<DateTime<Utc>> {
        let touched = sqlx::query_scalar::<_, i64>(
            "UPDATE db_file SET accessed_on = ?2 WHERE name = ?1 RETURNING accessed_on",
        )
        .bind(name)
        .bind(to_micros(Utc::now()))
        .fetch_optional(&self.pool)
        .await?;

        touched
            .map(from_micros)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM db_file WHERE name = ?1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(name.to_string()));
        }
        Ok(())
    }

    async fn exists(&self, name: &str) -> StorageResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM db_file WHERE name = ?1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }

    async fn size(&self, name: &str) -> StorageResult<u64> {
        let length = sqlx::query_scalar::<_, i64>(
            "SELECT length(content) FROM db_file WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        length
            .map(|n| n as u64)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn created_on(&self, name: &str) -> StorageResult<DateTime<Utc>> {
        let micros =
            sqlx::query_scalar::<_, i64>("SELECT created_on FROM db_file WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        micros
            .map(from_micros)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn updated_on(&self, name: &str) -> StorageResult<DateTime<Utc>> {
        let micros =
            sqlx::query_scalar::<_, i64>("SELECT updated_on FROM db_file WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        micros
            .map(from_micros)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn accessed_on(&self, name: &str) -> StorageResult<Option<DateTime<Utc>>> {
        let micros = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT accessed_on FROM db_file WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        match micros {
            Some(value) => Ok(value.map(from_micros)),
            None => Err(StorageError::NotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteRecordStore {
        let store = SqliteRecordStore::connect("sqlite::memory:").await.unwrap();
        store.init_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = memory_store().await;
        let created = store.create("test.file", b"custom content").await.unwrap();
        assert_eq!(created.name, "test.file");
        assert!(created.accessed_on.is_none());

        let fetched = store.get("test.file").await.unwrap();
        assert_eq!(fetched.content, b"custom content");
        assert_eq!(
            fetched.created_on.timestamp_micros(),
            created.created_on.timestamp_micros()
        );
        assert_eq!(fetched.created_on, fetched.updated_on);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let store = memory_store().await;
        store.create("test.file", b"a").await.unwrap();
        let err = store.create("test.file", b"b").await.unwrap_err();
        assert_eq!(err, StorageError::DuplicateName("test.file".to_string()));
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_name() {
        let store = memory_store().await;
        let err = store.create(&"x".repeat(256), b"a").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = memory_store().await;
        let err = store.get("missing").await.unwrap_err();
        assert_eq!(err, StorageError::NotFound("missing".to_string()));
    }

    #[tokio::test]
    async fn test_update_content_refreshes_updated_on() {
        let store = memory_store().await;
        let created = store.create("test.file", b"before").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = store.update_content("test.file", b"after").await.unwrap();
        assert_eq!(updated.content, b"after");
        assert!(updated.updated_on > created.created_on);
        assert_eq!(
            updated.created_on.timestamp_micros(),
            created.created_on.timestamp_micros()
        );
        assert!(updated.validate().is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = memory_store().await;
        let err = store.update_content("missing", b"x").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_touch_accessed_round_trips() {
        let store = memory_store().await;
        store.create("test.file", b"content").await.unwrap();
        assert_eq!(store.accessed_on("test.file").await.unwrap(), None);

        let touched = store.touch_accessed("test.file").await.unwrap();
        assert_eq!(store.accessed_on("test.file").await.unwrap(), Some(touched));
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let store = memory_store().await;
        store.create("test.file", b"content").await.unwrap();
        assert!(store.exists("test.file").await.unwrap());

        store.delete("test.file").await.unwrap();
        assert!(!store.exists("test.file").await.unwrap());

        let err = store.delete("test.file").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_size() {
        let store = memory_store().await;
        store.create("test.file", b"storage contents").await.unwrap();
        assert_eq!(store.size("test.file").await.unwrap(), 16);
        assert!(matches!(
            store.size("missing").await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_file_backed_database_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("files.db").display());

        let store = SqliteRecordStore::connect(&url).await.unwrap();
        store.init_schema().await.unwrap();
        store.create("test.file", b"durable").await.unwrap();
        drop(store);

        let reopened = SqliteRecordStore::connect(&url).await.unwrap();
        reopened.init_schema().await.unwrap();
        assert_eq!(reopened.get("test.file").await.unwrap().content, b"durable");
    }
}
