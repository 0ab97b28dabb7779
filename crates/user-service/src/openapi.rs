use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::users::{UserCreateRequest, UserCreated, UserView};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            UserCreateRequest,
            UserCreated,
            UserView,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
