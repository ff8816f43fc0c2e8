//! Aula core library
//!
//! Domain models, configuration, and error types for the aula course-file
//! gateway. This crate has no HTTP or database connectivity of its own; the
//! storage and db crates build on the types defined here.

pub mod config;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use sanitize::sanitize_filename;
pub use storage_types::StorageBackend;
