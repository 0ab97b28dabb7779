use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::types::{ErrorBody, Health};
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::client::UserServiceClient;

pub async fn health() -> Json<Health> {
    Json(Health { status: "video-service is healthy" })
}

/// Proxy to the user-service. Downstream failures come back as `{"error": ...}` with 200.
/// A non-integer id never reaches the downstream and is answered with 400.
pub async fn fetch_user(
    State(client): State<UserServiceClient>,
    user_id: Result<Path<i32>, PathRejection>,
) -> Response {
    let user_id = match user_id {
        Ok(Path(id)) => id,
        Err(r) => {
            let msg = format!("invalid path: {}", r.body_text());
            warn!(status = 400, error = %msg, "request rejected");
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::new(msg))).into_response();
        }
    };
    let outcome = client.fetch_user(user_id).await;
    info!(user_id, ok = outcome.is_success(), "fetch-user relayed");
    Json::<Value>(outcome.into_envelope()).into_response()
}

pub fn build_router(client: UserServiceClient) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/fetch-user/:user_id", get(fetch_user))
        .with_state(client)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
