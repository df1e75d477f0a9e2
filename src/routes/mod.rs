//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                  - Service greeting
//!
//! # Chat
//! POST   /chat/             - Run one conversation turn
//! GET    /latest-messages/  - Recent history window (chronological)
//!
//! # Users
//! POST   /users/            - Register a user (409 if email taken)
//! GET    /users/            - List users (skip/limit)
//! GET    /users/{id}        - Get one user (404 if absent)
//! POST   /users/{id}/items/ - Create an item under a user
//!
//! # Items
//! GET    /items/            - List items (skip/limit)
//!
//! # Messages
//! POST   /messages/         - Create a message directly
//! GET    /messages/         - List messages (skip/limit)
//! DELETE /messages/         - Delete every message (unscoped)
//! ```

pub mod chat;
pub mod items;
pub mod messages;
pub mod users;

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Offset/limit pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    /// Rows to skip from the start, default 0.
    #[serde(default)]
    pub skip: i64,
    /// Maximum rows to return, default 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn default_limit() -> i64 {
    100
}

/// Simple `{message}` payload used by the root and delete responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(chat::router())
        .merge(users::router())
        .merge(items::router())
        .merge(messages::router())
}

/// Build the full application with state applied.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes().with_state(state)
}

/// Service greeting.
///
/// GET /
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello Azure OpenAI".to_string(),
    })
}
