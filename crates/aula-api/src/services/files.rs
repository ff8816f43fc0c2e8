//! File orchestration service
//!
//! Composes sanitizer + access control + object-store + metadata-store calls
//! into the upload, download-link, and delete use cases. The steps inside
//! each operation are strictly sequential: the access check always precedes
//! the storage write, and the storage write always precedes the metadata
//! insert. There are no cross-store transactions; consistency between the
//! blob store and the metadata store is best-effort, with the failure
//! windows documented on each method.

use std::sync::Arc;
use std::time::Duration;

use aula_core::models::{Identity, NewFile, StoredFile};
use aula_core::sanitize::{extension_of, sanitize_filename};
use aula_core::AppError;
use aula_db::{FileStore, ModuleStore};
use aula_storage::ObjectStore;
use uuid::Uuid;

use crate::services::access::AccessControl;

/// Upload input assembled by the handler from the multipart form.
#[derive(Debug)]
pub struct UploadRequest {
    pub module_id: i64,
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
    pub custom_name: Option<String>,
}

pub struct FileService {
    files: Arc<dyn FileStore>,
    modules: Arc<dyn ModuleStore>,
    access: Arc<AccessControl>,
    storage: Arc<dyn ObjectStore>,
    max_upload_bytes: usize,
    signed_url_ttl: Duration,
}

impl FileService {
    pub fn new(
        files: Arc<dyn FileStore>,
        modules: Arc<dyn ModuleStore>,
        access: Arc<AccessControl>,
        storage: Arc<dyn ObjectStore>,
        max_upload_bytes: usize,
        signed_url_ttl: Duration,
    ) -> Self {
        Self {
            files,
            modules,
            access,
            storage,
            max_upload_bytes,
            signed_url_ttl,
        }
    }

    /// Upload a file into a module.
    ///
    /// Order: resolve module -> authorize -> size check -> sanitize ->
    /// storage write -> metadata insert. The size and name checks run before
    /// any I/O. If the storage write fails no metadata row exists; if the
    /// metadata insert fails the written blob is orphaned (not reclaimed
    /// here).
    pub async fn upload(
        &self,
        request: UploadRequest,
        caller: &Identity,
    ) -> Result<StoredFile, AppError> {
        let ownership = self
            .modules
            .ownership(request.module_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))?;

        if !self
            .access
            .can_access_module(caller, request.module_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "Not authorized for this module".to_string(),
            ));
        }

        if request.data.len() > self.max_upload_bytes {
            return Err(AppError::InvalidInput(format!(
                "File size exceeds maximum allowed size of {} MB",
                self.max_upload_bytes / 1024 / 1024
            )));
        }

        let safe_original = sanitize_filename(&request.original_filename);
        if safe_original.is_empty() {
            return Err(AppError::InvalidInput(
                "Filename is empty after sanitization".to_string(),
            ));
        }

        let display_name = match request.custom_name.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => {
                let safe_custom = sanitize_filename(custom);
                if safe_custom.is_empty() {
                    safe_original.clone()
                } else {
                    safe_custom
                }
            }
            _ => safe_original.clone(),
        };

        // The random suffix guarantees path uniqueness regardless of the
        // original filename.
        let extension = extension_of(&safe_original).to_string();
        let storage_path = format!(
            "universities/{}/courses/{}/modules/{}/{}{}",
            ownership.university_id,
            ownership.course_id,
            ownership.module_id,
            Uuid::new_v4(),
            extension
        );
        let size_bytes = request.data.len() as i64;

        tracing::info!(
            module_id = ownership.module_id,
            storage_path = %storage_path,
            size_bytes,
            "Uploading file"
        );

        let storage_url = self
            .storage
            .put(&storage_path, request.data, &request.content_type)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    storage_path = %storage_path,
                    "Object store write failed"
                );
                AppError::Storage(format!("Failed to store file: {}", e))
            })?;

        let file_type = extension
            .strip_prefix('.')
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_lowercase());

        let file = self
            .files
            .insert(NewFile {
                module_id: ownership.module_id,
                name: display_name,
                file_type,
                original_filename: safe_original,
                storage_path,
                storage_url,
                content_type: request.content_type,
                size_bytes,
            })
            .await?;

        tracing::info!(file_id = file.id, module_id = file.module_id, "File uploaded");

        Ok(file)
    }

    /// Access-gated detail lookup.
    pub async fn get(&self, file_id: i64, caller: &Identity) -> Result<StoredFile, AppError> {
        let file = self.load_authorized(file_id, caller).await?;
        Ok(file)
    }

    /// Issue a time-limited read URL for a file.
    ///
    /// When the backend cannot sign (credential mode without signing
    /// capability), the plain object URL is returned instead - degraded but
    /// non-fatal. Issuing a link refreshes the file's updated_at timestamp.
    pub async fn download_url(&self, file_id: i64, caller: &Identity) -> Result<String, AppError> {
        let file = self.load_authorized(file_id, caller).await?;

        let url = match self
            .storage
            .signed_read_url(&file.storage_path, self.signed_url_ttl)
            .await
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    file_id,
                    "Signed URL unavailable, falling back to plain object URL"
                );
                file.storage_url.clone()
            }
        };

        if let Err(e) = self.files.touch(file.id).await {
            tracing::warn!(error = %e, file_id, "Failed to refresh file timestamp");
        }

        Ok(url)
    }

    /// Delete a file: blob first, metadata second.
    ///
    /// An already-absent blob is not an error (idempotent delete) but is
    /// logged distinctly from a true deletion. A hard blob-delete failure
    /// keeps the metadata row so the record of a possibly-live blob is never
    /// lost.
    pub async fn delete(&self, file_id: i64, caller: &Identity) -> Result<(), AppError> {
        let file = self.load_authorized(file_id, caller).await?;

        match self.storage.delete(&file.storage_path).await {
            Ok(true) => {
                tracing::info!(file_id, storage_path = %file.storage_path, "Deleted object");
            }
            Ok(false) => {
                tracing::warn!(
                    file_id,
                    storage_path = %file.storage_path,
                    "Object already absent, removing metadata only"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    file_id,
                    storage_path = %file.storage_path,
                    "Object store delete failed, metadata retained"
                );
                return Err(AppError::Storage(format!("Failed to delete file: {}", e)));
            }
        }

        self.files.delete(file.id).await?;

        tracing::info!(file_id, "File deleted");

        Ok(())
    }

    /// Load a file and enforce access through its owning module.
    async fn load_authorized(
        &self,
        file_id: i64,
        caller: &Identity,
    ) -> Result<StoredFile, AppError> {
        let file = self
            .files
            .get(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if !self
            .access
            .can_access_module(caller, file.module_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "Not authorized for this file".to_string(),
            ));
        }

        Ok(file)
    }
}
