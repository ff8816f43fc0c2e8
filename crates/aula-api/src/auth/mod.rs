//! Token validation and request authentication.
//!
//! Two strategies compose into one validator: a remote token-introspection
//! call against the configured authority, and a local HS256 verification
//! fallback used only when the remote is unavailable. A 401 from the remote
//! is terminal - the token was examined and rejected, so no fallback runs.

pub mod local;
pub mod middleware;
pub mod models;
pub mod remote;
pub mod validator;

pub use local::LocalTokenVerifier;
pub use models::AuthUser;
pub use remote::{RemoteAuthClient, RemoteOutcome, TokenIntrospector};
pub use validator::TokenValidator;
