pub mod file;
pub mod identity;
pub mod module;

pub use file::{FileResponse, NewFile, StoredFile};
pub use identity::{Identity, UserType};
pub use module::ModuleOwnership;
