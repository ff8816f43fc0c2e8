use async_trait::async_trait;
use aula_core::models::{NewFile, StoredFile};
use aula_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::traits::FileStore;

/// Postgres-backed file repository.
#[derive(Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for PgFileRepository {
    #[tracing::instrument(skip(self, file), fields(db.table = "files", db.operation = "insert", module_id = file.module_id))]
    async fn insert(&self, file: NewFile) -> Result<StoredFile, AppError> {
        let row = sqlx::query_as::<Postgres, StoredFile>(
            r#"
            INSERT INTO files (
                module_id, name, file_type, original_filename,
                storage_path, storage_url, content_type, size_bytes,
                is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(file.module_id)
        .bind(&file.name)
        .bind(&file.file_type)
        .bind(&file.original_filename)
        .bind(&file.storage_path)
        .bind(&file.storage_url)
        .bind(&file.content_type)
        .bind(file.size_bytes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select", db.record_id = id))]
    async fn get(&self, id: i64) -> Result<Option<StoredFile>, AppError> {
        let row = sqlx::query_as::<Postgres, StoredFile>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "update", db.record_id = id))]
    async fn touch(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE files SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "delete", db.record_id = id))]
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
