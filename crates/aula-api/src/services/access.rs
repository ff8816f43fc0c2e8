//! Access control evaluation over the ownership hierarchy.
//!
//! A strict allow-list: every decision path either matches an explicit rule
//! or denies. Absence of a rule is a deny, never an error. The evaluator
//! only reads the Module -> Course -> University chain and professor-course
//! assignments; it never mutates anything.

use aula_core::models::{Identity, UserType};
use aula_core::AppError;
use aula_db::{FileStore, ModuleStore, ProfessorCourseStore};
use std::collections::HashSet;
use std::sync::Arc;

pub struct AccessControl {
    modules: Arc<dyn ModuleStore>,
    files: Arc<dyn FileStore>,
    professor_courses: Arc<dyn ProfessorCourseStore>,
    course_cap: i64,
}

impl AccessControl {
    pub fn new(
        modules: Arc<dyn ModuleStore>,
        files: Arc<dyn FileStore>,
        professor_courses: Arc<dyn ProfessorCourseStore>,
        course_cap: i64,
    ) -> Self {
        Self {
            modules,
            files,
            professor_courses,
            course_cap,
        }
    }

    /// Decide whether `user` may act on `module_id`.
    ///
    /// 1. Super admins are allowed unconditionally, before any lookup.
    /// 2. A module that cannot be resolved to a university is denied.
    /// 3. Admin professors are allowed within their own university.
    /// 4. Other professors are allowed only for courses they are assigned to.
    /// 5. Everyone else is denied.
    pub async fn can_access_module(
        &self,
        user: &Identity,
        module_id: i64,
    ) -> Result<bool, AppError> {
        if user.user_type == UserType::SuperAdmin {
            return Ok(true);
        }

        let Some(ownership) = self.modules.ownership(module_id).await? else {
            tracing::debug!(module_id, user_id = user.user_id, "Module not found, denying");
            return Ok(false);
        };

        match user.user_type {
            UserType::Professor if user.is_admin => {
                Ok(user.university_id == Some(ownership.university_id))
            }
            UserType::Professor => {
                let assigned = self.professor_course_ids(user.user_id).await?;
                Ok(assigned.contains(&ownership.course_id))
            }
            _ => Ok(false),
        }
    }

    /// Decide whether `user` may act on `file_id`. Delegates to the module
    /// check via the file's module; a file that does not exist is denied.
    pub async fn can_access_file(&self, user: &Identity, file_id: i64) -> Result<bool, AppError> {
        match self.files.get(file_id).await? {
            Some(file) => self.can_access_module(user, file.module_id).await,
            None => Ok(false),
        }
    }

    /// Course ids assigned to a professor, bounded by the configured cap.
    /// Hitting the cap logs a warning but is not an error.
    pub async fn professor_course_ids(
        &self,
        professor_id: i64,
    ) -> Result<HashSet<i64>, AppError> {
        let ids = self
            .professor_courses
            .course_ids(professor_id, self.course_cap)
            .await?;

        if ids.len() as i64 >= self.course_cap {
            tracing::warn!(
                professor_id,
                cap = self.course_cap,
                "Professor course assignments hit the configured cap; results may be truncated"
            );
        }

        Ok(ids.into_iter().collect())
    }
}
