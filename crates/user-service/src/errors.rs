use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::UserStoreError;
use thiserror::Error;
use tracing::{error, warn};

/// Failures surfaced to user-service callers as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error(transparent)]
    Store(#[from] UserStoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(UserStoreError::Conflict { .. }) => StatusCode::CONFLICT,
            ApiError::Store(UserStoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(UserStoreError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::MalformedRequest(r.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        ApiError::InvalidPath(r.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %msg, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %msg, "request rejected");
        }
        (status, Json(ErrorBody::new(msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_and_server_statuses() {
        let conflict = ApiError::from(UserStoreError::Conflict { email: "a@b.c".into() });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(conflict.to_string(), "email already registered: a@b.c");

        assert_eq!(ApiError::from(UserStoreError::NotFound(4)).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(UserStoreError::Repository("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::MalformedRequest("x".into()).status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn response_carries_error_body() {
        let resp = ApiError::from(UserStoreError::NotFound(7)).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
