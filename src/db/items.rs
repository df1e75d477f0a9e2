//! Item repository for database operations.

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::{Item, ItemId, UserId};

/// Internal row type for item queries.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ItemRow {
    pub(super) id: i64,
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) owner_id: i64,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: ItemId::new(row.id),
            title: row.title,
            description: row.description,
            owner_id: UserId::new(row.owner_id),
        }
    }
}

/// Repository for item database operations.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an item under the given owner.
    ///
    /// Owner existence is the caller's concern; the API layer rejects
    /// unknown owners before calling this.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        owner_id: UserId,
    ) -> Result<Item, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            INSERT INTO items (title, description, owner_id)
            VALUES (?1, ?2, ?3)
            RETURNING id, title, description, owner_id
            ",
        )
        .bind(title)
        .bind(description)
        .bind(owner_id.as_i64())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List items in insertion order with offset/limit pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, title, description, owner_id
            FROM items
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            ",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// All items owned by one user, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_owner(&self, owner_id: UserId) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, title, description, owner_id
            FROM items
            WHERE owner_id = ?1
            ORDER BY id
            ",
        )
        .bind(owner_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{UserRepository, test_pool};

    #[tokio::test]
    async fn test_create_and_list_items() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);
        let repo = ItemRepository::new(&pool);

        let owner = users.create("a@b.com", "x").await.expect("user");
        let item = repo
            .create("notebook", Some("ruled"), owner.id)
            .await
            .expect("item");

        assert_eq!(item.title, "notebook");
        assert_eq!(item.description.as_deref(), Some("ruled"));
        assert_eq!(item.owner_id, owner.id);

        let all = repo.list(0, 100).await.expect("list");
        assert_eq!(all.len(), 1);

        let owned = repo.for_owner(owner.id).await.expect("for_owner");
        assert_eq!(owned.len(), 1);
    }

    #[tokio::test]
    async fn test_description_is_optional() {
        let pool = test_pool().await;
        let users = UserRepository::new(&pool);
        let repo = ItemRepository::new(&pool);

        let owner = users.create("a@b.com", "x").await.expect("user");
        let item = repo.create("bare", None, owner.id).await.expect("item");

        assert!(item.description.is_none());
    }
}
