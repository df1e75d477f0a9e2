//! Chat route handler.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::Message;
use crate::services::ChatService;
use crate::state::AppState;

/// Build the chat router.
pub fn router() -> Router<AppState> {
    Router::new().route("/chat/", post(chat))
}

/// Request body for one conversation turn.
#[derive(Debug, Deserialize)]
pub struct ChatTurnRequest {
    pub content: String,
    pub is_stupid_question: bool,
    /// Accepted for wire compatibility; the persisted turn is always
    /// role "user".
    pub role: Option<String>,
}

/// Run one conversation turn and return the full message listing.
///
/// POST /chat/
///
/// Persists the user turn, relays the recent history to the completion
/// service, persists the assistant reply, and responds with all messages.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatTurnRequest>,
) -> Result<Json<Vec<Message>>, AppError> {
    if let Some(role) = &request.role
        && role != "user"
    {
        tracing::debug!(%role, "Submitted role ignored; turn is persisted as \"user\"");
    }

    let service = ChatService::new(state.pool(), state.completion());
    let messages = service
        .run_turn(&request.content, request.is_stupid_question)
        .await?;

    Ok(Json(messages))
}
