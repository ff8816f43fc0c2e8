use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored file's metadata row.
///
/// `storage_path` is unique and derived from the owning hierarchy plus a
/// random suffix; the original filename never appears in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoredFile {
    pub id: i64,
    pub module_id: i64,
    /// Display name shown to end users (sanitized).
    pub name: String,
    pub file_type: Option<String>,
    pub original_filename: String,
    pub storage_path: String,
    pub storage_url: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub is_active: bool,
    /// Correlation ids for external sync tooling; never written by uploads.
    pub external_id: Option<String>,
    pub external_source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new file row. Timestamps and the active flag are
/// server-set by the repository.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub module_id: i64,
    pub name: String,
    pub file_type: Option<String>,
    pub original_filename: String,
    pub storage_path: String,
    pub storage_url: String,
    pub content_type: String,
    pub size_bytes: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponse {
    pub id: i64,
    pub module_id: i64,
    pub name: String,
    pub file_type: Option<String>,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredFile> for FileResponse {
    fn from(file: StoredFile) -> Self {
        FileResponse {
            id: file.id,
            module_id: file.module_id,
            name: file.name,
            file_type: file.file_type,
            original_filename: file.original_filename,
            content_type: file.content_type,
            size_bytes: file.size_bytes,
            url: file.storage_url,
            is_active: file.is_active,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> StoredFile {
        let now = Utc::now();
        StoredFile {
            id: 101,
            module_id: 12,
            name: "syllabus.pdf".to_string(),
            file_type: Some("pdf".to_string()),
            original_filename: "syllabus.pdf".to_string(),
            storage_path: "universities/1/courses/4/modules/12/4d9e2c7a.pdf".to_string(),
            storage_url: "https://bucket.s3.eu-west-1.amazonaws.com/universities/1/courses/4/modules/12/4d9e2c7a.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size_bytes: 48_213,
            is_active: true,
            external_id: None,
            external_source: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_file_response_from_stored_file() {
        let file = sample_file();
        let created_at = file.created_at;

        let response = FileResponse::from(file);

        assert_eq!(response.id, 101);
        assert_eq!(response.module_id, 12);
        assert_eq!(response.name, "syllabus.pdf");
        assert_eq!(response.file_type.as_deref(), Some("pdf"));
        assert!(response.url.contains("universities/1/courses/4/modules/12"));
        assert_eq!(response.size_bytes, 48_213);
        assert!(response.is_active);
        assert_eq!(response.created_at, created_at);
    }

    #[test]
    fn test_file_response_does_not_expose_storage_path() {
        let file = sample_file();
        let json = serde_json::to_value(FileResponse::from(file)).unwrap();
        assert!(json.get("storage_path").is_none());
        assert!(json.get("url").is_some());
    }
}
