//! User repository for database operations.

use std::collections::HashMap;

use sqlx::SqlitePool;

use super::RepositoryError;
use super::items::ItemRow;
use crate::models::{User, UserId};

/// Internal row type for user queries.
///
/// The password column is written on insert and never selected back.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    is_active: bool,
}

impl UserRow {
    fn into_user(self, items: Vec<crate::models::Item>) -> User {
        User {
            id: UserId::new(self.id),
            email: self.email,
            is_active: self.is_active,
            items,
        }
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    ///
    /// The account starts active with no items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered, `RepositoryError::Database` for other failures.
    pub async fn create(&self, email: &str, password: &str) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (email, password, is_active)
            VALUES (?1, ?2, 1)
            RETURNING id, email, is_active
            ",
        )
        .bind(email)
        .bind(password)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into_user(Vec::new()))
    }

    /// Get a user by ID, with their items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, is_active
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = super::ItemRepository::new(self.pool).for_owner(id).await?;
                Ok(Some(row.into_user(items)))
            }
            None => Ok(None),
        }
    }

    /// Get a user by email address, with their items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, is_active
            FROM users
            WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = super::ItemRepository::new(self.pool)
                    .for_owner(UserId::new(row.id))
                    .await?;
                Ok(Some(row.into_user(items)))
            }
            None => Ok(None),
        }
    }

    /// List users in insertion order with offset/limit pagination.
    ///
    /// Items are fetched for the whole page in one query and grouped by
    /// owner, instead of one query per user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, is_active
            FROM users
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            ",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;

        let item_rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, title, description, owner_id
            FROM items
            WHERE owner_id IN (SELECT id FROM users ORDER BY id LIMIT ?1 OFFSET ?2)
            ORDER BY id
            ",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(self.pool)
        .await?;

        let mut by_owner: HashMap<i64, Vec<crate::models::Item>> = HashMap::new();
        for item_row in item_rows {
            by_owner
                .entry(item_row.owner_id)
                .or_default()
                .push(item_row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = by_owner.remove(&row.id).unwrap_or_default();
                row.into_user(items)
            })
            .collect())
    }
}
