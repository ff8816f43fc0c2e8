//! Composed token validation.

use crate::auth::local::LocalTokenVerifier;
use crate::auth::remote::{RemoteOutcome, TokenIntrospector};
use aula_core::models::Identity;
use std::sync::Arc;

/// Turns an opaque bearer token into a verified identity, or nothing.
///
/// Strategy order: remote introspection first when configured; the local
/// verifier runs only when no remote is configured or the remote is
/// unavailable. A remote 401 never falls back - the token was examined and
/// rejected. No internal fault ever propagates out of [`validate`]; the
/// caller always gets a binary outcome.
///
/// [`validate`]: TokenValidator::validate
pub struct TokenValidator {
    remote: Option<Arc<dyn TokenIntrospector>>,
    local: Option<LocalTokenVerifier>,
}

impl TokenValidator {
    pub fn new(
        remote: Option<Arc<dyn TokenIntrospector>>,
        local: Option<LocalTokenVerifier>,
    ) -> Self {
        Self { remote, local }
    }

    pub async fn validate(&self, token: &str) -> Option<Identity> {
        if let Some(remote) = &self.remote {
            match remote.introspect(token).await {
                RemoteOutcome::Valid(claims) => {
                    let identity = Identity::from_claims(&claims);
                    if identity.is_none() {
                        tracing::warn!(
                            "Token authority accepted the token but returned an unmappable claim payload"
                        );
                    }
                    return identity;
                }
                RemoteOutcome::Rejected => {
                    tracing::debug!("Token rejected by remote authority");
                    return None;
                }
                RemoteOutcome::Unavailable => {
                    if self.local.is_some() {
                        tracing::warn!(
                            "Remote token authority unavailable, falling back to local verification"
                        );
                    } else {
                        tracing::warn!(
                            "Remote token authority unavailable and no local verifier configured"
                        );
                    }
                }
            }
        }

        self.local.as_ref().and_then(|local| local.verify(token))
    }
}
