//! Message route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use crate::db::MessageRepository;
use crate::error::AppError;
use crate::models::Message;
use crate::services::HISTORY_WINDOW;
use crate::state::AppState;

use super::{MessageResponse, Pagination};

/// Build the message router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/messages/",
            get(list_messages)
                .post(create_message)
                .delete(delete_messages),
        )
        .route("/latest-messages/", get(latest_messages))
}

/// Request to create a message directly (no completion call).
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub content: String,
    pub is_stupid_question: bool,
    pub role: String,
}

/// Create a message.
///
/// POST /messages/
async fn create_message(
    State(state): State<AppState>,
    Json(request): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = MessageRepository::new(state.pool())
        .create(&request.content, request.is_stupid_question, &request.role)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// List messages in insertion order.
///
/// GET /messages/?skip=0&limit=100
async fn list_messages(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = MessageRepository::new(state.pool())
        .list(pagination.skip, pagination.limit)
        .await?;
    Ok(Json(messages))
}

/// Delete every message. Unscoped, no confirmation step.
///
/// DELETE /messages/
async fn delete_messages(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let removed = MessageRepository::new(state.pool()).delete_all().await?;
    tracing::info!(removed, "All messages deleted");
    Ok(Json(MessageResponse {
        message: "All messages deleted".to_string(),
    }))
}

/// The recent history window in chronological order.
///
/// GET /latest-messages/
async fn latest_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = MessageRepository::new(state.pool())
        .latest(HISTORY_WINDOW)
        .await?;
    Ok(Json(messages))
}
