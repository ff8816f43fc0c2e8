use serde::{Deserialize, Serialize};

/// The resolved Module -> Course -> University ownership chain for a module.
///
/// Read-only: the gateway never mutates modules, courses, or universities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ModuleOwnership {
    pub module_id: i64,
    pub course_id: i64,
    pub university_id: i64,
}
