//! OpenAPI document assembly.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::file_upload::upload_file,
        crate::handlers::file_get::get_file,
        crate::handlers::file_download::get_download_url,
        crate::handlers::file_delete::delete_file,
        crate::handlers::health::health_check,
    ),
    components(schemas(
        aula_core::models::FileResponse,
        crate::handlers::file_download::DownloadUrlResponse,
        crate::handlers::file_delete::MessageResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "files", description = "Course file upload, download, and deletion")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
