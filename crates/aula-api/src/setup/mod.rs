//! Application initialization: database, services, routes, server.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod telemetry;

use crate::state::AppState;
use anyhow::Result;
use aula_core::Config;
use axum::Router;
use std::sync::Arc;

/// Initialize the full application: connect the database, build the object
/// store, wire services, and assemble the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let pool = database::create_pool(&config).await?;

    let storage = aula_storage::create_object_store(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize object store: {}", e))?;
    tracing::info!(backend = %storage.backend_type(), "Object store initialized");

    let (state, validator) = services::initialize_services(&config, pool, storage);

    let router = routes::setup_routes(&config, state.clone(), validator)?;

    Ok((state, router))
}
