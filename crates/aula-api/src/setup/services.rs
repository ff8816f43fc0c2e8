//! Service initialization and application state setup
//!
//! All wiring is explicit constructor-based: each capability is bound to its
//! implementation here, at startup, and nowhere else.

use crate::auth::{LocalTokenVerifier, RemoteAuthClient, TokenIntrospector, TokenValidator};
use crate::services::access::AccessControl;
use crate::services::files::FileService;
use crate::state::AppState;
use aula_core::Config;
use aula_db::{
    FileStore, ModuleStore, PgFileRepository, PgModuleRepository, PgProfessorCourseRepository,
    ProfessorCourseStore,
};
use aula_storage::ObjectStore;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Build all services and repositories, returning the application state and
/// the token validator for the auth middleware.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn ObjectStore>,
) -> (Arc<AppState>, Arc<TokenValidator>) {
    let files: Arc<dyn FileStore> = Arc::new(PgFileRepository::new(pool.clone()));
    let modules: Arc<dyn ModuleStore> = Arc::new(PgModuleRepository::new(pool.clone()));
    let professor_courses: Arc<dyn ProfessorCourseStore> =
        Arc::new(PgProfessorCourseRepository::new(pool.clone()));

    let access = Arc::new(AccessControl::new(
        modules.clone(),
        files.clone(),
        professor_courses,
        config.professor_course_cap,
    ));

    let file_service = Arc::new(FileService::new(
        files,
        modules,
        access.clone(),
        storage.clone(),
        config.max_upload_bytes,
        Duration::from_secs(config.signed_url_ttl_seconds),
    ));

    let validator = Arc::new(build_token_validator(config));

    let state = Arc::new(AppState {
        config: config.clone(),
        db_pool: pool,
        storage,
        access,
        files: file_service,
    });

    (state, validator)
}

fn build_token_validator(config: &Config) -> TokenValidator {
    let remote: Option<Arc<dyn TokenIntrospector>> = match &config.auth_authority_url {
        Some(base_url) => {
            match RemoteAuthClient::new(
                base_url.clone(),
                Duration::from_secs(config.auth_timeout_seconds),
            ) {
                Ok(client) => {
                    tracing::info!(
                        authority = %base_url,
                        timeout_seconds = config.auth_timeout_seconds,
                        "Remote token validation enabled"
                    );
                    Some(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build remote auth client");
                    None
                }
            }
        }
        None => None,
    };

    let local = config.jwt_secret.as_ref().map(|secret| {
        tracing::info!(
            issuer = ?config.jwt_issuer,
            "Local token verification enabled"
        );
        LocalTokenVerifier::new(
            secret,
            config.jwt_issuer.as_deref(),
            config.jwt_audience.as_deref(),
        )
    });

    if remote.is_none() && local.is_none() {
        // Config::validate rejects this at startup; reaching here means every
        // request will be unauthenticated.
        tracing::error!("No token validation strategy configured");
    }

    TokenValidator::new(remote, local)
}
