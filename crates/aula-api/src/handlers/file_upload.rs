use crate::auth::models::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::files::UploadRequest;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use aula_core::models::FileResponse;
use aula_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File uploaded successfully", body = FileResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Not authorized for the module", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = extract_upload_form(multipart).await?;

    let file = state.files.upload(request, &user).await?;

    Ok((StatusCode::CREATED, Json(FileResponse::from(file))))
}

/// Extract the upload form fields from multipart form data.
/// Exactly one field named "file" is accepted; `moduleId` is required.
async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadRequest, HttpAppError> {
    let mut module_id: Option<i64> = None;
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut custom_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "moduleId" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read moduleId: {}", e))
                })?;
                module_id = Some(text.trim().parse::<i64>().map_err(|_| {
                    AppError::InvalidInput(format!("Invalid moduleId: {}", text))
                })?);
            }
            "customName" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read customName: {}", e))
                })?;
                custom_name = Some(text);
            }
            "file" => {
                if file_data.is_some() {
                    return Err(HttpAppError(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    )));
                }
                filename = field.file_name().map(|s: &str| s.to_string());
                content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                file_data = Some(data.to_vec());
            }
            _ => {}
        }
    }

    let module_id =
        module_id.ok_or_else(|| AppError::InvalidInput("No moduleId provided".to_string()))?;
    let data = file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    Ok(UploadRequest {
        module_id,
        data,
        original_filename: filename.unwrap_or_default(),
        content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
        custom_name,
    })
}
