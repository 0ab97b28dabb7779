//! Outbound client for the user-service `GET /users/{id}` endpoint.

use reqwest::Url;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid user-service url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("http client build failed: {0}")]
    Build(#[from] reqwest::Error),
}

/// Result of one downstream lookup. Never an `Err`: every failure is a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 2xx with a JSON body, relayed unchanged.
    Success(Value),
    /// Downstream answered with any non-2xx status, redirects included.
    StatusError(u16),
    /// No usable response: connect/DNS/IO failure or a body that is not JSON.
    TransportError(String),
}

impl FetchOutcome {
    /// Body returned to the video-service caller, always with status 200.
    pub fn into_envelope(self) -> Value {
        match self {
            FetchOutcome::Success(payload) => payload,
            FetchOutcome::StatusError(code) => {
                json!({ "error": format!("User service returned error: {code}") })
            }
            FetchOutcome::TransportError(msg) => json!({ "error": msg }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}

#[derive(Clone, Debug)]
pub struct UserServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl UserServiceClient {
    /// No timeout or retry is configured; the transport defaults apply.
    /// Redirects are not followed, so a 3xx is reported as a status error.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("video-service/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http, base_url: trimmed.to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_url(&self, user_id: i32) -> String {
        format!("{}/users/{user_id}", self.base_url)
    }

    pub async fn fetch_user(&self, user_id: i32) -> FetchOutcome {
        let url = self.user_url(user_id);
        debug!(%url, "fetching user from user-service");

        let resp = match self.http.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%url, error = %e, "user-service unreachable");
                return FetchOutcome::TransportError(e.to_string());
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "user-service returned error status");
            return FetchOutcome::StatusError(status.as_u16());
        }

        match resp.json::<Value>().await {
            Ok(payload) => FetchOutcome::Success(payload),
            Err(e) => {
                warn!(%url, error = %e, "user-service body is not valid JSON");
                FetchOutcome::TransportError(e.to_string())
            }
        }
    }
}
