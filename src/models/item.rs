//! Item domain model.

use serde::{Deserialize, Serialize};

use super::{ItemId, UserId};

/// An item owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Item title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Owning user.
    pub owner_id: UserId,
}
