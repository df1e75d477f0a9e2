//! Item route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::db::ItemRepository;
use crate::error::AppError;
use crate::models::Item;
use crate::state::AppState;

use super::Pagination;

/// Build the item router.
pub fn router() -> Router<AppState> {
    Router::new().route("/items/", get(list_items))
}

/// List items in insertion order.
///
/// GET /items/?skip=0&limit=100
async fn list_items(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Item>>, AppError> {
    let items = ItemRepository::new(state.pool())
        .list(pagination.skip, pagination.limit)
        .await?;
    Ok(Json(items))
}
