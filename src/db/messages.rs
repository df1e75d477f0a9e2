//! Message repository for database operations.

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::{Message, MessageId};

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    content: String,
    is_stupid_question: bool,
    role: String,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: MessageId::new(row.id),
            content: row.content,
            is_stupid_question: row.is_stupid_question,
            role: row.role,
        }
    }
}

/// Repository for chat message database operations.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a message and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        content: &str,
        is_stupid_question: bool,
        role: &str,
    ) -> Result<Message, RepositoryError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r"
            INSERT INTO messages (content, is_stupid_question, role)
            VALUES (?1, ?2, ?3)
            RETURNING id, content, is_stupid_question, role
            ",
        )
        .bind(content)
        .bind(is_stupid_question)
        .bind(role)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List messages in insertion order with offset/limit pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r"
            SELECT id, content, is_stupid_question, role
            FROM messages
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

    /// The most recent `n` messages in chronological order (oldest of the
    /// window first).
    ///
    /// The ordering is load-bearing: the result is fed directly into a
    /// completion request as conversation history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest(&self, n: i64) -> Result<Vec<Message>, RepositoryError> {
        let mut rows = sqlx::query_as::<_, MessageRow>(
            r"
            SELECT id, content, is_stupid_question, role
            FROM messages
            ORDER BY id DESC
            LIMIT ?1
            ",
        )
        .bind(n)
        .fetch_all(self.pool)
        .await?;

        rows.reverse();
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Delete every message. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages").execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn seed(repo: &MessageRepository<'_>, count: usize) {
        for i in 0..count {
            repo.create(&format!("message {i}"), false, "user")
                .await
                .expect("create");
        }
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order() {
        let pool = test_pool().await;
        let repo = MessageRepository::new(&pool);
        seed(&repo, 3).await;

        let messages = repo.list(0, 100).await.expect("list");
        assert_eq!(messages.len(), 3);
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["message 0", "message 1", "message 2"]);
    }

    #[tokio::test]
    async fn test_latest_is_a_chronological_suffix() {
        let pool = test_pool().await;
        let repo = MessageRepository::new(&pool);
        seed(&repo, 5).await;

        let window = repo.latest(3).await.expect("latest");
        assert_eq!(window.len(), 3);
        let contents: Vec<_> = window.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["message 2", "message 3", "message 4"]);
    }

    #[tokio::test]
    async fn test_latest_never_exceeds_window() {
        let pool = test_pool().await;
        let repo = MessageRepository::new(&pool);
        seed(&repo, 2).await;

        let window = repo.latest(10).await.expect("latest");
        assert_eq!(window.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_all_then_list_is_empty() {
        let pool = test_pool().await;
        let repo = MessageRepository::new(&pool);
        seed(&repo, 4).await;

        let removed = repo.delete_all().await.expect("delete");
        assert_eq!(removed, 4);
        assert!(repo.list(0, 100).await.expect("list").is_empty());
    }
}
