use async_trait::async_trait;
use aula_core::AppError;
use sqlx::PgPool;

use crate::traits::ProfessorCourseStore;

/// Read-only professor-course assignment lookups.
#[derive(Clone)]
pub struct PgProfessorCourseRepository {
    pool: PgPool,
}

impl PgProfessorCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfessorCourseStore for PgProfessorCourseRepository {
    #[tracing::instrument(skip(self), fields(db.table = "professor_courses", db.operation = "select", professor_id = professor_id))]
    async fn course_ids(&self, professor_id: i64, limit: i64) -> Result<Vec<i64>, AppError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT course_id FROM professor_courses WHERE professor_id = $1 LIMIT $2",
        )
        .bind(professor_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
