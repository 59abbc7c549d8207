//! # HTTP Server Module
//!
//! The serving layer: streams stored file bytes over HTTP and optionally
//! marks access, delegating all storage policy to the façade.

pub mod config;
pub mod file_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use file_routes::{file_routes, ErrorResponse, FileStorageState};
pub use server::HttpServer;
