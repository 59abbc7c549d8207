//! # Record Store Module
//!
//! The persisted file entity and its durable store: one row per stored file,
//! single-statement operations, row-level invariant validation.

pub mod model;
pub mod sqlite;
pub mod store;

pub use model::FileRecord;
pub use sqlite::SqliteRecordStore;
pub use store::RecordStore;
