//! Caller identity derived from verified token claims.
//!
//! The claim payload is a flat key-value map regardless of which validation
//! strategy produced it (remote introspection or local JWT verification), so
//! the mapping into [`Identity`] is a pure function independent of any
//! transport framework. Identities live only for the request that carried
//! the token; nothing here is persisted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Caller category for authorization decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Student,
    Professor,
    SuperAdmin,
    /// Anything the claim payload names that we do not recognize. Always
    /// denied by the access evaluator.
    Unknown,
}

impl UserType {
    pub fn parse(s: &str) -> UserType {
        match s {
            "student" => UserType::Student,
            "professor" => UserType::Professor,
            "super_admin" => UserType::SuperAdmin,
            _ => UserType::Unknown,
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UserType::Student => write!(f, "student"),
            UserType::Professor => write!(f, "professor"),
            UserType::SuperAdmin => write!(f, "super_admin"),
            UserType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Verified per-request identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub user_type: UserType,
    /// Tenant boundary for admin professors; absent for super admins.
    pub university_id: Option<i64>,
    /// University-wide elevated access flag for professors.
    pub is_admin: bool,
}

impl Identity {
    /// Build an identity from a flat claim map.
    ///
    /// `sub` is required and must be numeric (or a numeric string — remote
    /// authorities commonly serialize ids as strings). `role` is preferred
    /// over `type` when both are present. Returns `None` when no usable
    /// subject claim exists.
    pub fn from_claims(claims: &Map<String, Value>) -> Option<Identity> {
        let user_id = claim_i64(claims, "sub")?;
        let username = claim_str(claims, "name").unwrap_or_default();
        let email = claim_str(claims, "email").unwrap_or_default();
        let user_type = claim_str(claims, "role")
            .or_else(|| claim_str(claims, "type"))
            .map(|r| UserType::parse(&r))
            .unwrap_or(UserType::Unknown);
        let university_id = claim_i64(claims, "university_id");
        let is_admin = claim_bool(claims, "is_admin").unwrap_or(false);

        Some(Identity {
            user_id,
            username,
            email,
            user_type,
            university_id,
            is_admin,
        })
    }
}

fn claim_str(claims: &Map<String, Value>, key: &str) -> Option<String> {
    claims
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn claim_i64(claims: &Map<String, Value>, key: &str) -> Option<i64> {
    match claims.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn claim_bool(claims: &Map<String, Value>, key: &str) -> Option<bool> {
    match claims.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "True" => Some(true),
            "false" | "False" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
