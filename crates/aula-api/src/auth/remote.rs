//! Remote token introspection client.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

const VALIDATE_TOKEN_PATH: &str = "/api/auth/validate-token";

/// Outcome of a remote introspection attempt.
///
/// `Rejected` means the authority examined the token and said no (401) -
/// terminal, no fallback. `Unavailable` covers every other failure mode:
/// non-success status, network error, timeout, unparseable body.
#[derive(Debug)]
pub enum RemoteOutcome {
    Valid(Map<String, Value>),
    Rejected,
    Unavailable,
}

/// Introspection capability, implemented by [`RemoteAuthClient`] and by test
/// doubles.
#[async_trait]
pub trait TokenIntrospector: Send + Sync {
    async fn introspect(&self, token: &str) -> RemoteOutcome;
}

/// HTTP client for the remote token authority.
pub struct RemoteAuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteAuthClient {
    /// Create a client with a bounded request timeout. The timeout covers the
    /// whole introspection round-trip; anything slower counts as unavailable.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, anyhow::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TokenIntrospector for RemoteAuthClient {
    async fn introspect(&self, token: &str) -> RemoteOutcome {
        let url = format!("{}{}", self.base_url, VALIDATE_TOKEN_PATH);

        let response = match self.http.get(&url).bearer_auth(token).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Token introspection request failed");
                return RemoteOutcome::Unavailable;
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return RemoteOutcome::Rejected;
        }
        if !status.is_success() {
            tracing::warn!(status = %status, url = %url, "Token authority returned non-success status");
            return RemoteOutcome::Unavailable;
        }

        match response.json::<Map<String, Value>>().await {
            Ok(claims) => RemoteOutcome::Valid(claims),
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "Failed to parse claim payload");
                RemoteOutcome::Unavailable
            }
        }
    }
}
