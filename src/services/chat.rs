//! Chat service orchestrating one conversation turn.
//!
//! This service handles the complete flow of:
//! 1. Persisting the user turn
//! 2. Assembling conversation history into a turn list
//! 3. Calling the completion service
//! 4. Persisting the assistant reply
//! 5. Returning the full message listing

use sqlx::SqlitePool;
use tracing::{info, instrument};

use crate::db::MessageRepository;
use crate::error::AppError;
use crate::models::{Message, MessageId};
use crate::openai::{CompletionClient, Turn};

/// Number of recent messages fed to a completion request as history.
pub const HISTORY_WINDOW: i64 = 10;

/// Listing bound for the chat response body.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Chat service for relaying conversation turns to the completion service.
pub struct ChatService<'a> {
    pool: &'a SqlitePool,
    completion: &'a CompletionClient,
}

impl<'a> ChatService<'a> {
    /// Create a new chat service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, completion: &'a CompletionClient) -> Self {
        Self { pool, completion }
    }

    /// Run one conversation turn and return the full message listing.
    ///
    /// The submitted turn is persisted with role "user" before anything
    /// else happens. If a later step fails, that turn stays in place: a
    /// user turn without a paired reply is an accepted terminal state,
    /// there is no compensating rollback.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation or the completion call
    /// fails. No reply is persisted on failure.
    #[instrument(skip(self, content))]
    pub async fn run_turn(
        &self,
        content: &str,
        is_stupid_question: bool,
    ) -> Result<Vec<Message>, AppError> {
        let repo = MessageRepository::new(self.pool);

        let user_message = repo.create(content, is_stupid_question, "user").await?;

        let history = repo.latest(HISTORY_WINDOW).await?;
        let turns = build_turns(&history, user_message.id, content);

        let reply = self.completion.complete(turns).await?;
        info!(reply_chars = reply.len(), "Completion reply received");

        repo.create(&reply, false, "assistant").await?;

        Ok(repo.list(0, DEFAULT_LIST_LIMIT).await?)
    }
}

/// Assemble the turn list for a completion request.
///
/// Contract:
/// - exactly one system turn, always first;
/// - `history` is the chronological latest-message window; the row
///   identified by `current_id` is dropped from it so the submitted
///   content is not sent twice;
/// - the submitted content is appended as the final user turn, so the
///   request never depends on reading the just-written row back;
/// - stored roles other than "assistant" are sent as user turns (role is
///   free text in the store).
#[must_use]
pub fn build_turns(history: &[Message], current_id: MessageId, content: &str) -> Vec<Turn> {
    let mut turns = Vec::with_capacity(history.len() + 2);
    turns.push(Turn::system(SYSTEM_PROMPT));

    for message in history.iter().filter(|m| m.id != current_id) {
        if message.role == "assistant" {
            turns.push(Turn::assistant(message.content.clone()));
        } else {
            turns.push(Turn::user(message.content.clone()));
        }
    }

    turns.push(Turn::user(content));
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::TurnRole;

    fn message(id: i64, role: &str, content: &str) -> Message {
        Message {
            id: MessageId::new(id),
            content: content.to_string(),
            is_stupid_question: false,
            role: role.to_string(),
        }
    }

    #[test]
    fn test_build_turns_has_single_leading_system_turn() {
        let history = vec![message(1, "user", "hi"), message(2, "assistant", "hello")];
        let turns = build_turns(&history, MessageId::new(3), "how are you?");

        assert_eq!(turns[0].role, TurnRole::System);
        let system_count = turns
            .iter()
            .filter(|t| t.role == TurnRole::System)
            .count();
        assert_eq!(system_count, 1);
    }

    #[test]
    fn test_build_turns_excludes_current_and_appends_it_last() {
        let history = vec![
            message(1, "user", "hi"),
            message(2, "assistant", "hello"),
            message(3, "user", "how are you?"),
        ];
        let turns = build_turns(&history, MessageId::new(3), "how are you?");

        // system, hi, hello, how are you? (appended, not read back)
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[1].content, "hi");
        assert_eq!(turns[2].content, "hello");
        assert_eq!(turns[3].content, "how are you?");
        assert_eq!(turns[3].role, TurnRole::User);
    }

    #[test]
    fn test_build_turns_preserves_chronological_order() {
        let history = vec![
            message(1, "user", "one"),
            message(2, "assistant", "two"),
            message(3, "user", "three"),
            message(4, "assistant", "four"),
        ];
        let turns = build_turns(&history, MessageId::new(9), "five");

        let contents: Vec<_> = turns.iter().skip(1).map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn test_build_turns_maps_unknown_roles_to_user() {
        let history = vec![message(1, "moderator", "be nice")];
        let turns = build_turns(&history, MessageId::new(2), "ok");

        assert_eq!(turns[1].role, TurnRole::User);
    }

    #[test]
    fn test_build_turns_with_empty_history() {
        let turns = build_turns(&[], MessageId::new(1), "hi");

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::System);
        assert_eq!(turns[1].role, TurnRole::User);
        assert_eq!(turns[1].content, "hi");
    }
}
