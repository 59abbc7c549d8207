//! # File Record
//!
//! The sole persisted entity: one row per stored file, binary content plus
//! lifecycle timestamps. Timestamps are timezone-aware UTC everywhere and
//! persist as UTC microseconds, so naive/aware comparison mismatches cannot
//! occur.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::errors::{StorageError, StorageResult};
use crate::storage::name::MAX_NAME_LENGTH;

/// One stored file: content and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique logical name, at most 255 characters
    pub name: String,
    /// Full binary payload; read and written as a whole
    pub content: Vec<u8>,
    /// Set exactly once at first insert
    pub created_on: DateTime<Utc>,
    /// Refreshed on every content update
    pub updated_on: DateTime<Utc>,
    /// Refreshed on tracked reads only; null until first tracked access
    pub accessed_on: Option<DateTime<Utc>>,
}

impl FileRecord {
    /// Create a fresh record with both lifecycle timestamps set to now
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            content,
            created_on: now,
            updated_on: now,
            accessed_on: None,
        }
    }

    /// Byte length of the content
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Check row-level invariants: name length and timestamp ordering
    pub fn validate(&self) -> StorageResult<()> {
        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Err(StorageError::InvalidRecord(format!(
                "name exceeds {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if self.created_on > self.updated_on {
            return Err(StorageError::InvalidRecord(
                "created_on is after updated_on".to_string(),
            ));
        }
        Ok(())
    }
}

/// Encode a timestamp as UTC microseconds for persistence
pub(crate) fn to_micros(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_micros()
}

/// Decode persisted UTC microseconds back into a timestamp
pub(crate) fn from_micros(micros: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(micros).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_record_timestamps() {
        let record = FileRecord::new("test.file", b"custom content".to_vec());
        assert_eq!(record.created_on, record.updated_on);
        assert!(record.accessed_on.is_none());
        assert_eq!(record.size(), 14);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_long_name() {
        let record = FileRecord::new("x".repeat(256), Vec::new());
        assert!(matches!(
            record.validate(),
            Err(StorageError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_timestamps() {
        let mut record = FileRecord::new("test.file", Vec::new());
        record.created_on = record.updated_on + Duration::seconds(1);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_micros_round_trip() {
        let now = Utc::now();
        let back = from_micros(to_micros(now));
        // Persistence is microsecond precision
        assert_eq!(back.timestamp_micros(), now.timestamp_micros());
    }
}
