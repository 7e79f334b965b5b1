//! TURN credential negotiation
//!
//! When direct peer connectivity is unavailable the transport asks for
//! time-limited relay credentials. The transport raises that request in-band;
//! this module turns it into an HTTPS exchange with the session's TURN
//! control endpoint and rewrites the result against the session's signaling
//! URL and URL-rewriting policy. The exchange is fire-and-forget from the
//! controller's perspective: exactly one outcome (success or failure) per
//! request, no retry at this layer, no timeout beyond the HTTP client's own.
//! Overlapping requests are not deduplicated; the transport issues them
//! serially.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ShareSessionConfiguration;
use crate::error::{ContentShareError, Result};

/// Header carrying the session's base join token on the credential request
pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// One credential request, as issued to the TURN control endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnCredentialRequest {
    /// Meeting the credentials are scoped to
    pub meeting_id: String,
    /// HTTPS endpoint serving the credentials
    pub turn_control_url: String,
    /// Join token with any modality suffix stripped
    pub join_token: String,
}

/// Raw relay credentials as returned by the TURN control endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnCredentials {
    pub username: String,
    pub password: String,
    /// Credential lifetime in seconds
    pub ttl: u64,
    /// Relay server URIs, before rewriting
    pub uris: Vec<String>,
}

/// Credentials rewritten for this session, ready to push into the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSessionResponse {
    /// Relay URIs after the session's URL rewriter was applied
    pub uris: Vec<String>,
    pub username: String,
    pub password: String,
    pub ttl_secs: u64,
    /// Signaling URL the credentials are valid against, rewritten
    pub signaling_url: String,
    /// Absolute expiry computed from the ttl at negotiation time
    pub expires_at: DateTime<Utc>,
}

/// The external call that actually fetches credentials
///
/// Split out as a seam so the negotiation flow can be exercised without a
/// network.
#[async_trait]
pub trait TurnCredentialFetcher: Send + Sync {
    async fn fetch(&self, request: &TurnCredentialRequest) -> Result<TurnCredentials>;
}

/// Production fetcher: HTTPS POST against the TURN control endpoint
pub struct HttpTurnFetcher {
    http: reqwest::Client,
}

impl HttpTurnFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTurnFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TurnCredentialFetcher for HttpTurnFetcher {
    async fn fetch(&self, request: &TurnCredentialRequest) -> Result<TurnCredentials> {
        let response = self
            .http
            .post(&request.turn_control_url)
            .header(SESSION_TOKEN_HEADER, &request.join_token)
            .json(&serde_json::json!({ "meetingId": request.meeting_id }))
            .send()
            .await?
            .error_for_status()?;

        let credentials = response.json::<TurnCredentials>().await?;
        Ok(credentials)
    }
}

/// Negotiates relay credentials on the transport's behalf
///
/// Stateless between requests; nothing is cached at this layer.
#[derive(Clone)]
pub struct TurnCredentialNegotiator {
    fetcher: Arc<dyn TurnCredentialFetcher>,
}

impl TurnCredentialNegotiator {
    pub fn new(fetcher: Arc<dyn TurnCredentialFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch credentials for the session and rewrite them for its transport
    pub async fn negotiate(
        &self,
        configuration: &ShareSessionConfiguration,
    ) -> Result<TurnSessionResponse> {
        if configuration.turn_control_url.is_empty() {
            return Err(ContentShareError::config(
                "no TURN control URL configured for this session",
            ));
        }

        let request = TurnCredentialRequest {
            meeting_id: configuration.meeting_id.clone(),
            turn_control_url: configuration.turn_control_url.clone(),
            join_token: configuration.join_token_base().to_string(),
        };

        tracing::debug!(
            "Requesting TURN credentials for meeting {} from {}",
            request.meeting_id,
            request.turn_control_url
        );
        let credentials = self.fetcher.fetch(&request).await?;

        let rewriter = &configuration.url_rewriter;
        let uris = credentials.uris.iter().map(|uri| rewriter(uri)).collect();
        let ttl = credentials.ttl;

        Ok(TurnSessionResponse {
            uris,
            username: credentials.username,
            password: credentials.password,
            ttl_secs: ttl,
            signaling_url: rewriter(&configuration.signaling_url),
            expires_at: Utc::now() + chrono::Duration::seconds(ttl as i64),
        })
    }
}
