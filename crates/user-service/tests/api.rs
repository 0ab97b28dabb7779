use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::users::repository::memory::InMemoryUserStore;
use tower::ServiceExt;

use user_service::{build_router, AppState};

fn app() -> Router {
    build_router(AppState::new(Arc::new(InMemoryUserStore::default())))
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

fn post_json(uri: &str, body: &Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().uri(uri).body(Body::empty())?)
}

#[tokio::test]
async fn create_returns_only_id_and_email() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, post_json("/users", &json!({"name": "Alice", "email": "alice@example.com"}))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "email": "alice@example.com"}));
    assert!(body.get("name").is_none());
    Ok(())
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() -> anyhow::Result<()> {
    let (status, body) = send(&app(), get("/users")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn list_includes_created_users_with_names() -> anyhow::Result<()> {
    let app = app();
    send(&app, post_json("/users", &json!({"name": "Alice", "email": "alice@example.com"}))?).await?;
    send(&app, post_json("/users", &json!({"name": "Bob", "email": "bob@example.com"}))?).await?;

    let (status, body) = send(&app, get("/users")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "Alice", "email": "alice@example.com"},
            {"id": 2, "name": "Bob", "email": "bob@example.com"}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_conflict() -> anyhow::Result<()> {
    let app = app();
    let req = json!({"name": "Alice", "email": "alice@example.com"});
    send(&app, post_json("/users", &req)?).await?;
    let (status, body) = send(&app, post_json("/users", &json!({"name": "Other", "email": "alice@example.com"}))?).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email already registered: alice@example.com");

    let (_, listed) = send(&app, get("/users")?).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn missing_or_mistyped_fields_are_malformed() -> anyhow::Result<()> {
    let app = app();
    for bad in [json!({"name": "NoEmail"}), json!({"name": 5, "email": "x@example.com"}), json!([1, 2])] {
        let (status, body) = send(&app, post_json("/users", &bad)?).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {bad}");
        assert!(body["error"].as_str().unwrap_or_default().starts_with("malformed request"));
    }

    let not_json = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{name"))?;
    let (status, _) = send(&app, not_json).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn empty_strings_are_accepted() -> anyhow::Result<()> {
    let (status, body) = send(&app(), post_json("/users", &json!({"name": "", "email": ""}))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "email": ""}));
    Ok(())
}

#[tokio::test]
async fn get_user_by_id_and_not_found() -> anyhow::Result<()> {
    let app = app();
    send(&app, post_json("/users", &json!({"name": "Carol", "email": "carol@example.com"}))?).await?;

    let (status, body) = send(&app, get("/users/1")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Carol", "email": "carol@example.com"}));

    let (status, body) = send(&app, get("/users/42")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user 42 not found");

    let (status, _) = send(&app, get("/users/abc")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, get("/health")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "user-service is healthy"}));

    let (status, doc) = send(&app, get("/api-docs/openapi.json")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/users/{id}"].is_object());
    Ok(())
}
