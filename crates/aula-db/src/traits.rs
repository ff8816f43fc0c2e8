//! Metadata-store capability traits.

use async_trait::async_trait;
use aula_core::models::{ModuleOwnership, NewFile, StoredFile};
use aula_core::AppError;

/// File row lifecycle. The orchestration layer owns ordering (storage writes
/// and deletes happen around these calls, never inside them).
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Insert a new file row with server-set timestamps and active = true.
    async fn insert(&self, file: NewFile) -> Result<StoredFile, AppError>;

    async fn get(&self, id: i64) -> Result<Option<StoredFile>, AppError>;

    /// Refresh a file's updated_at timestamp. The only mutation a file row
    /// sees after insert.
    async fn touch(&self, id: i64) -> Result<(), AppError>;

    /// Delete a file row. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

/// Read-only view of the module ownership chain.
#[async_trait]
pub trait ModuleStore: Send + Sync {
    /// Resolve the owning course and university for a module, or `None` when
    /// the module does not exist.
    async fn ownership(&self, module_id: i64) -> Result<Option<ModuleOwnership>, AppError>;
}

/// Read-only view of professor-course assignments.
#[async_trait]
pub trait ProfessorCourseStore: Send + Sync {
    /// Course ids assigned to a professor, bounded by `limit` rows.
    async fn course_ids(&self, professor_id: i64, limit: i64) -> Result<Vec<i64>, AppError>;
}
