use async_trait::async_trait;
use aula_core::models::ModuleOwnership;
use aula_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::traits::ModuleStore;

/// Read-only module/course lookups.
#[derive(Clone)]
pub struct PgModuleRepository {
    pool: PgPool,
}

impl PgModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModuleStore for PgModuleRepository {
    #[tracing::instrument(skip(self), fields(db.table = "modules", db.operation = "select", db.record_id = module_id))]
    async fn ownership(&self, module_id: i64) -> Result<Option<ModuleOwnership>, AppError> {
        let row = sqlx::query_as::<Postgres, ModuleOwnership>(
            r#"
            SELECT m.id AS module_id, m.course_id, c.university_id
            FROM modules m
            JOIN courses c ON c.id = m.course_id
            WHERE m.id = $1
            "#,
        )
        .bind(module_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
