//! # Storage Façade Module
//!
//! The public storage contract over the record store: save, open, delete,
//! exists, size, url, and timestamp accessors, plus all naming and URL
//! policy.

pub mod content;
pub mod errors;
pub mod facade;
pub mod name;
pub mod url;

pub use content::{ContentFile, ContentSource, StoredFile};
pub use errors::{StorageError, StorageResult};
pub use facade::DbFileStorage;
pub use name::MAX_NAME_LENGTH;
