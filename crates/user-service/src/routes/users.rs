use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use service::users::domain::{NewUser, User};
use utoipa::ToSchema;

use super::AppState;
use crate::errors::ApiError;

/// `POST /users` body. Both fields are required strings.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserCreateRequest {
    pub name: String,
    pub email: String,
}

/// `POST /users` response. `name` is deliberately absent.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UserCreated {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UserView {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserCreated {
    fn from(u: User) -> Self {
        Self { id: u.id, email: u.email }
    }
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self { id: u.id, name: u.name, email: u.email }
    }
}

#[utoipa::path(post, path = "/users", tag = "users", request_body = UserCreateRequest, responses((status = 200, description = "Created", body = UserCreated), (status = 409, description = "Email already registered"), (status = 422, description = "Malformed body")))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserCreateRequest>, JsonRejection>,
) -> Result<Json<UserCreated>, ApiError> {
    let Json(input) = payload?;
    let user = state
        .users
        .create(NewUser { name: input.name, email: input.email })
        .await?;
    Ok(Json(user.into()))
}

#[utoipa::path(get, path = "/users", tag = "users", responses((status = 200, description = "All users", body = [UserView])))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[utoipa::path(get, path = "/users/{id}", tag = "users", params(("id" = i32, Path, description = "User id")), responses((status = 200, description = "User", body = UserView), (status = 404, description = "No such user")))]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<UserView>, ApiError> {
    let Path(id) = id?;
    let user = state.users.get(id).await?;
    Ok(Json(user.into()))
}
