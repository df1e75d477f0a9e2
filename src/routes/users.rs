//! User route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use crate::db::{ItemRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Item, User, UserId};
use crate::state::AppState;

use super::Pagination;

/// Build the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/items/", post(create_item_for_user))
}

/// Request to register a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

/// Request to create an item under a user.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub title: String,
    pub description: Option<String>,
}

/// Register a new user.
///
/// POST /users/
///
/// Returns 409 if the email is already registered. The lookup pre-check
/// gives the common case a clean answer; a racing insert that slips past
/// it hits the unique constraint and maps to the same status.
async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let repo = UserRepository::new(state.pool());

    if repo.get_by_email(&request.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let user = repo.create(&request.email, &request.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users in insertion order.
///
/// GET /users/?skip=0&limit=100
async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserRepository::new(state.pool())
        .list(pagination.skip, pagination.limit)
        .await?;
    Ok(Json(users))
}

/// Get one user with their items.
///
/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = UserRepository::new(state.pool())
        .get(UserId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

/// Create an item under a user.
///
/// POST /users/{id}/items/
///
/// Rejects unknown owners with 404 rather than inserting a dangling
/// reference.
async fn create_item_for_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let owner_id = UserId::new(id);

    if UserRepository::new(state.pool()).get(owner_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let item = ItemRepository::new(state.pool())
        .create(&request.title, request.description.as_deref(), owner_id)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}
