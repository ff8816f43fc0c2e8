//! Aula storage library
//!
//! Object-store abstraction and backends for the gateway. Keys are
//! hierarchy-scoped: `universities/{u}/courses/{c}/modules/{m}/{suffix}`.
//! Keys must not contain `..` or a leading `/`; the backends validate this
//! so no caller can escape the store's namespace.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use aula_core::StorageBackend;
pub use factory::create_object_store;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectStore, StorageError, StorageResult};
