//! # Content Sources
//!
//! The narrow capability the façade needs from file content: a readable
//! sequence of bytes with a known length and an optional intrinsic name.
//! Implemented by an in-memory buffer ([`ContentFile`]) and the record-backed
//! reader returned by `open` ([`StoredFile`]).

use crate::record::FileRecord;

/// A readable sequence of bytes with a known length
pub trait ContentSource {
    /// Intrinsic name carried by the content, if any
    fn file_name(&self) -> Option<&str> {
        None
    }

    /// Length in bytes
    fn len(&self) -> u64;

    /// Whether the content is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full buffered content
    fn bytes(&self) -> &[u8];
}

/// In-memory file content, optionally carrying its own name
#[derive(Debug, Clone)]
pub struct ContentFile {
    name: Option<String>,
    data: Vec<u8>,
}

impl ContentFile {
    /// Create anonymous content from a byte buffer
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            data: data.into(),
        }
    }

    /// Create content that carries its own name
    pub fn named(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: Some(name.into()),
            data: data.into(),
        }
    }
}

impl ContentSource for ContentFile {
    fn file_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Buffered content of a stored record, returned by `open`
#[derive(Debug, Clone)]
pub struct StoredFile {
    name: String,
    data: Vec<u8>,
}

impl StoredFile {
    /// The resolved storage name this content was opened under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full buffered content
    pub fn read(&self) -> &[u8] {
        &self.data
    }

    /// Consume the reader, yielding the raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl From<FileRecord> for StoredFile {
    fn from(record: FileRecord) -> Self {
        Self {
            name: record.name,
            data: record.content,
        }
    }
}

impl ContentSource for StoredFile {
    fn file_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }
}
