use crate::auth::models::AuthUser;
use crate::auth::validator::TokenValidator;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use aula_core::AppError;
use std::sync::Arc;

pub async fn auth_middleware(
    State(validator): State<Arc<TokenValidator>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    if !auth_header.starts_with("Bearer ") {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    }

    let token = &auth_header[7..]; // Remove "Bearer " prefix

    match validator.validate(token).await {
        Some(identity) => {
            tracing::debug!(
                user_id = identity.user_id,
                user_type = %identity.user_type,
                "Request authenticated"
            );
            request.extensions_mut().insert(AuthUser(identity));
            next.run(request).await
        }
        None => HttpAppError(AppError::Unauthorized(
            "Invalid or expired token".to_string(),
        ))
        .into_response(),
    }
}
