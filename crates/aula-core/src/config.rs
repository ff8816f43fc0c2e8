//! Configuration module
//!
//! Environment-driven configuration for the gateway. Values are read once at
//! startup via [`Config::from_env`] and validated before any service starts.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
/// 15 MB, also enforced at the transport layer.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;
const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 3600;
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 8;
const DEFAULT_PROFESSOR_COURSE_CAP: i64 = 1000;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,

    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,

    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,

    // Token validation configuration
    /// Base URL of the remote token authority; introspection is
    /// `{base}/api/auth/validate-token`.
    pub auth_authority_url: Option<String>,
    pub auth_timeout_seconds: u64,
    /// Shared secret for the local fallback verifier (HS256).
    pub jwt_secret: Option<String>,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,

    // Upload limits
    pub max_upload_bytes: usize,
    pub signed_url_ttl_seconds: u64,
    /// Soft cap on professor-course assignment fan-out.
    pub professor_course_cap: i64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // .env is optional; real deployments set the environment directly
        dotenvy::dotenv().ok();

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = env_opt("STORAGE_BACKEND")
            .map(|s| s.parse::<StorageBackend>())
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))?;

        Ok(Config {
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            cors_origins,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: env_or("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS),
            storage_backend,
            s3_bucket: env_opt("S3_BUCKET"),
            s3_region: env_opt("S3_REGION").or_else(|| env_opt("AWS_REGION")),
            s3_endpoint: env_opt("S3_ENDPOINT"),
            local_storage_path: env_opt("LOCAL_STORAGE_PATH"),
            local_storage_base_url: env_opt("LOCAL_STORAGE_BASE_URL"),
            auth_authority_url: env_opt("AUTH_AUTHORITY_URL"),
            auth_timeout_seconds: env_or("AUTH_TIMEOUT_SECONDS", DEFAULT_AUTH_TIMEOUT_SECS),
            jwt_secret: env_opt("JWT_SECRET"),
            jwt_issuer: env_opt("JWT_ISSUER"),
            jwt_audience: env_opt("JWT_AUDIENCE"),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            signed_url_ttl_seconds: env_or("SIGNED_URL_TTL_SECONDS", DEFAULT_SIGNED_URL_TTL_SECS),
            professor_course_cap: env_or("PROFESSOR_COURSE_CAP", DEFAULT_PROFESSOR_COURSE_CAP),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.auth_authority_url.is_none() && self.jwt_secret.is_none() {
            anyhow::bail!(
                "No token validation strategy configured: set AUTH_AUTHORITY_URL and/or JWT_SECRET"
            );
        }
        if self.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be greater than zero");
        }
        if self.professor_course_cap <= 0 {
            anyhow::bail!("PROFESSOR_COURSE_CAP must be positive");
        }
        match self.storage_backend {
            Some(StorageBackend::S3) | None => {
                // S3 is the default backend; its settings are checked by the
                // storage factory so AmazonS3Builder::from_env can still fill gaps.
            }
            Some(StorageBackend::Local) => {
                if self.local_storage_path.is_none() || self.local_storage_base_url.is_none() {
                    anyhow::bail!(
                        "Local storage requires LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL"
                    );
                }
            }
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
