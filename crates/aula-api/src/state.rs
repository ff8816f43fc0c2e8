//! Application state shared by all handlers.

use crate::services::access::AccessControl;
use crate::services::files::FileService;
use aula_core::Config;
use aula_storage::ObjectStore;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared, stateless service handles. Cloned via `Arc` into every request;
/// nothing here holds cross-request mutable state.
pub struct AppState {
    pub config: Config,
    pub db_pool: PgPool,
    pub storage: Arc<dyn ObjectStore>,
    pub access: Arc<AccessControl>,
    pub files: Arc<FileService>,
}
