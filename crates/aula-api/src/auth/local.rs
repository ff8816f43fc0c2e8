//! Local JWT verification (fallback strategy).

use aula_core::models::Identity;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

/// Verifies token signatures against a configured shared secret and extracts
/// the claim set directly from the token body.
pub struct LocalTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl LocalTokenVerifier {
    pub fn new(secret: &str, issuer: Option<&str>, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = audience {
            validation.set_audience(&[audience]);
        } else {
            // jsonwebtoken rejects tokens carrying an `aud` claim unless one
            // is configured; without a configured audience we do not check it.
            validation.validate_aud = false;
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and map its claims into an identity. Every failure is
    /// logged and reduced to `None`.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        let token_data = match decode::<Value>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "Local JWT verification failed");
                return None;
            }
        };

        let claims = match token_data.claims.as_object() {
            Some(claims) => claims.clone(),
            None => {
                tracing::debug!("JWT body is not an object");
                return None;
            }
        };

        let identity = Identity::from_claims(&claims);
        if identity.is_none() {
            tracing::debug!("JWT claims missing a usable subject");
        }
        identity
    }
}
