//! dbstorage - a database-backed file storage server
//!
//! Persists file content and metadata in a relational database instead of a
//! filesystem or object store, behind a uniform storage contract: save, open,
//! delete, exists, size, url, and created/modified/accessed timestamps.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod record;
pub mod storage;
