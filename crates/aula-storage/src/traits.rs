//! Storage abstraction trait
//!
//! This module defines the ObjectStore trait that all storage backends must
//! implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("URL signing failed: {0}")]
    SigningFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) implement this trait so the
/// file orchestration layer never couples to backend details. Keys are
/// hierarchical and path-prefixed; see the crate root documentation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object and return its public URL.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Read an object. `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Delete an object. Returns whether the object existed; deleting an
    /// absent key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Generate a time-limited read URL for one object.
    ///
    /// Backends whose credential mode cannot sign return `SigningFailed`;
    /// callers decide whether to degrade to the plain object URL.
    async fn signed_read_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Check if an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
