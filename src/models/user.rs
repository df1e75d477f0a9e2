//! User domain model.

use serde::{Deserialize, Serialize};

use super::{Item, UserId};

/// A registered user.
///
/// The stored password is deliberately absent: it is written once at
/// signup and never read back out of the data access layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address (unique).
    pub email: String,
    /// Whether the account is active. Always true at creation.
    pub is_active: bool,
    /// Items owned by this user.
    pub items: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization() {
        let user = User {
            id: UserId::new(1),
            email: "a@b.com".to_string(),
            is_active: true,
            items: vec![],
        };

        let json = serde_json::to_string(&user).expect("serialize");
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"email\":\"a@b.com\""));
        assert!(json.contains("\"is_active\":true"));
        assert!(json.contains("\"items\":[]"));
        assert!(!json.contains("password"));
    }
}
