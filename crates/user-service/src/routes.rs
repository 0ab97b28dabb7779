use std::sync::Arc;

use axum::{routing::get, Json, Router};
use common::types::Health;
use service::{UserService, UserStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::openapi;

pub mod users;

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { users: UserService::new(store) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is reachable", body = openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "user-service is healthy" })
}

/// Build the user-service router with tracing and CORS layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
