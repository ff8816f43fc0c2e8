//! Aula database library
//!
//! Metadata-store capabilities for the gateway: CRUD for file rows, read-only
//! access to the module/course ownership chain and professor-course
//! assignments. Services depend on the capability traits so they can run
//! against in-memory fakes in tests; the Postgres implementations here are
//! wired in at startup.

pub mod files;
pub mod modules;
pub mod professors;
pub mod traits;

pub use files::PgFileRepository;
pub use modules::PgModuleRepository;
pub use professors::PgProfessorCourseRepository;
pub use traits::{FileStore, ModuleStore, ProfessorCourseStore};
