//! Shared test helpers: in-memory capability fakes and fixtures.
#![allow(dead_code)]

use async_trait::async_trait;
use aula_api::auth::{LocalTokenVerifier, TokenValidator};
use aula_api::services::access::AccessControl;
use aula_api::services::files::FileService;
use aula_api::state::AppState;
use aula_core::models::{Identity, ModuleOwnership, NewFile, StoredFile, UserType};
use aula_core::{AppError, Config, StorageBackend};
use aula_db::{FileStore, ModuleStore, ProfessorCourseStore};
use aula_storage::{ObjectStore, StorageError, StorageResult};
use axum::Router;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// ----- Identity fixtures -----

pub fn professor(user_id: i64, university_id: i64) -> Identity {
    Identity {
        user_id,
        username: format!("prof{}", user_id),
        email: format!("prof{}@example.edu", user_id),
        user_type: UserType::Professor,
        university_id: Some(university_id),
        is_admin: false,
    }
}

pub fn admin_professor(user_id: i64, university_id: i64) -> Identity {
    Identity {
        is_admin: true,
        ..professor(user_id, university_id)
    }
}

pub fn student(user_id: i64) -> Identity {
    Identity {
        user_id,
        username: format!("student{}", user_id),
        email: format!("student{}@example.edu", user_id),
        user_type: UserType::Student,
        university_id: Some(1),
        is_admin: false,
    }
}

pub fn super_admin(user_id: i64) -> Identity {
    Identity {
        user_id,
        username: "root".to_string(),
        email: "root@example.edu".to_string(),
        user_type: UserType::SuperAdmin,
        university_id: None,
        is_admin: false,
    }
}

// ----- Mock metadata stores -----

#[derive(Default)]
pub struct MockFileStore {
    files: Mutex<HashMap<i64, StoredFile>>,
    next_id: AtomicI64,
}

impl MockFileStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            files: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        })
    }

    pub fn add_file(&self, module_id: i64, storage_path: &str) -> StoredFile {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let file = StoredFile {
            id,
            module_id,
            name: format!("file{}.pdf", id),
            file_type: Some("pdf".to_string()),
            original_filename: format!("file{}.pdf", id),
            storage_path: storage_path.to_string(),
            storage_url: format!("http://store.test/{}", storage_path),
            content_type: "application/pdf".to_string(),
            size_bytes: 1024,
            is_active: true,
            external_id: None,
            external_source: None,
            created_at: now,
            updated_at: now,
        };
        self.files.lock().unwrap().insert(id, file.clone());
        file
    }

    pub fn contains(&self, id: i64) -> bool {
        self.files.lock().unwrap().contains_key(&id)
    }

    pub fn updated_at(&self, id: i64) -> Option<chrono::DateTime<Utc>> {
        self.files.lock().unwrap().get(&id).map(|f| f.updated_at)
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn insert(&self, file: NewFile) -> Result<StoredFile, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let stored = StoredFile {
            id,
            module_id: file.module_id,
            name: file.name,
            file_type: file.file_type,
            original_filename: file.original_filename,
            storage_path: file.storage_path,
            storage_url: file.storage_url,
            content_type: file.content_type,
            size_bytes: file.size_bytes,
            is_active: true,
            external_id: None,
            external_source: None,
            created_at: now,
            updated_at: now,
        };
        self.files.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> Result<Option<StoredFile>, AppError> {
        Ok(self.files.lock().unwrap().get(&id).cloned())
    }

    async fn touch(&self, id: i64) -> Result<(), AppError> {
        if let Some(file) = self.files.lock().unwrap().get_mut(&id) {
            file.updated_at = Utc::now() + chrono::Duration::milliseconds(1);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.files.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MockModuleStore {
    modules: Mutex<HashMap<i64, ModuleOwnership>>,
}

impl MockModuleStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_module(&self, module_id: i64, course_id: i64, university_id: i64) {
        self.modules.lock().unwrap().insert(
            module_id,
            ModuleOwnership {
                module_id,
                course_id,
                university_id,
            },
        );
    }
}

#[async_trait]
impl ModuleStore for MockModuleStore {
    async fn ownership(&self, module_id: i64) -> Result<Option<ModuleOwnership>, AppError> {
        Ok(self.modules.lock().unwrap().get(&module_id).copied())
    }
}

#[derive(Default)]
pub struct MockProfessorCourseStore {
    assignments: Mutex<HashMap<i64, Vec<i64>>>,
}

impl MockProfessorCourseStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn assign(&self, professor_id: i64, course_id: i64) {
        self.assignments
            .lock()
            .unwrap()
            .entry(professor_id)
            .or_default()
            .push(course_id);
    }
}

#[async_trait]
impl ProfessorCourseStore for MockProfessorCourseStore {
    async fn course_ids(&self, professor_id: i64, limit: i64) -> Result<Vec<i64>, AppError> {
        let mut ids = self
            .assignments
            .lock()
            .unwrap()
            .get(&professor_id)
            .cloned()
            .unwrap_or_default();
        ids.truncate(limit as usize);
        Ok(ids)
    }
}

// ----- Mock object store -----

#[derive(Default)]
pub struct MockObjectStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    pub put_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub fail_put: bool,
    pub fail_delete: bool,
    pub fail_signing: bool,
}

impl MockObjectStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_delete() -> Arc<Self> {
        Arc::new(Self {
            fail_delete: true,
            ..Self::default()
        })
    }

    pub fn without_signing() -> Arc<Self> {
        Arc::new(Self {
            fail_signing: true,
            ..Self::default()
        })
    }

    pub fn put_count(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn stored_keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> StorageResult<String> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put {
            return Err(StorageError::UploadFailed("injected failure".to_string()));
        }
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(format!("http://store.test/{}", key))
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(StorageError::DeleteFailed("injected failure".to_string()));
        }
        Ok(self.objects.lock().unwrap().remove(key).is_some())
    }

    async fn signed_read_url(&self, key: &str, _expires_in: Duration) -> StorageResult<String> {
        if self.fail_signing {
            return Err(StorageError::SigningFailed(
                "credential mode lacks signing capability".to_string(),
            ));
        }
        Ok(format!("http://store.test/{}?signature=abc", key))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

// ----- Service and router assembly -----

pub struct TestEnv {
    pub files: Arc<MockFileStore>,
    pub modules: Arc<MockModuleStore>,
    pub professor_courses: Arc<MockProfessorCourseStore>,
    pub storage: Arc<MockObjectStore>,
    pub access: Arc<AccessControl>,
    pub service: Arc<FileService>,
}

pub fn test_env() -> TestEnv {
    test_env_with_storage(MockObjectStore::new())
}

pub fn test_env_with_storage(storage: Arc<MockObjectStore>) -> TestEnv {
    let files = MockFileStore::new();
    let modules = MockModuleStore::new();
    let professor_courses = MockProfessorCourseStore::new();

    let access = Arc::new(AccessControl::new(
        modules.clone(),
        files.clone(),
        professor_courses.clone(),
        1000,
    ));

    let service = Arc::new(FileService::new(
        files.clone(),
        modules.clone(),
        access.clone(),
        storage.clone(),
        15 * 1024 * 1024,
        Duration::from_secs(3600),
    ));

    TestEnv {
        files,
        modules,
        professor_courses,
        storage,
        access,
        service,
    }
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        database_url: "postgres://postgres@localhost:5432/aula_test".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 1,
        storage_backend: Some(StorageBackend::Local),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some("/tmp/aula-test".to_string()),
        local_storage_base_url: Some("http://store.test".to_string()),
        auth_authority_url: None,
        auth_timeout_seconds: 8,
        jwt_secret: Some(TEST_JWT_SECRET.to_string()),
        jwt_issuer: None,
        jwt_audience: None,
        max_upload_bytes: 15 * 1024 * 1024,
        signed_url_ttl_seconds: 3600,
        professor_course_cap: 1000,
    }
}

/// Build a full router backed by mocks and a local-only token validator.
pub fn test_router(env: &TestEnv) -> Router {
    let config = test_config();

    // Lazy pool: router tests never reach a real database, and the health
    // probe fails fast instead of hanging.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(100))
        .connect_lazy(&config.database_url)
        .expect("lazy pool");

    let state = Arc::new(AppState {
        config: config.clone(),
        db_pool: pool,
        storage: env.storage.clone(),
        access: env.access.clone(),
        files: env.service.clone(),
    });

    let validator = Arc::new(TokenValidator::new(
        None,
        Some(LocalTokenVerifier::new(TEST_JWT_SECRET, None, None)),
    ));

    aula_api::setup::routes::setup_routes(&config, state, validator).expect("router")
}

/// Mint a token the local verifier accepts, for the given identity.
pub fn bearer_token_for(identity: &Identity) -> String {
    let claims = json!({
        "sub": identity.user_id,
        "name": identity.username,
        "email": identity.email,
        "role": identity.user_type.to_string(),
        "university_id": identity.university_id,
        "is_admin": identity.is_admin,
        "exp": Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Assemble a multipart/form-data body. Returns (content_type_header, body).
pub fn multipart_body(
    module_id: Option<i64>,
    filename: &str,
    content_type: &str,
    content: &[u8],
    custom_name: Option<&str>,
) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "test-boundary-7f3a9c";

    let mut body = Vec::new();
    if let Some(module_id) = module_id {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"moduleId\"\r\n\r\n{}\r\n",
                BOUNDARY, module_id
            )
            .as_bytes(),
        );
    }
    if let Some(custom_name) = custom_name {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"customName\"\r\n\r\n{}\r\n",
                BOUNDARY, custom_name
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, filename, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        body,
    )
}

/// The uuid segment of a generated storage path, if the path matches the
/// `universities/{u}/courses/{c}/modules/{m}/{uuid}{ext}` scheme.
pub fn path_uuid_segment(path: &str, prefix: &str) -> Option<uuid::Uuid> {
    let rest = path.strip_prefix(prefix)?;
    let stem = rest.split('.').next()?;
    uuid::Uuid::parse_str(stem).ok()
}
