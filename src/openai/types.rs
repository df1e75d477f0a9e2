//! Wire types for the chat-completions API.

use serde::{Deserialize, Serialize};

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Instruction turn, at most one per request.
    System,
    /// Turn submitted by a person.
    User,
    /// Turn generated by the model.
    Assistant,
}

/// One role-tagged unit of conversation text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced this turn.
    pub role: TurnRole,
    /// The turn's text.
    pub content: String,
}

impl Turn {
    /// A system instruction turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::System,
            content: content.into(),
        }
    }

    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// An assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model or deployment identifier.
    pub model: String,
    /// Ordered conversation turns.
    pub messages: Vec<Turn>,
}

/// Response from the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Generated candidates; exactly one is requested.
    pub choices: Vec<Choice>,
}

/// A single generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated reply turn.
    pub message: ChoiceMessage,
}

/// The reply turn inside a choice.
///
/// `content` is nullable on the wire, so it stays an `Option` here and
/// the client treats its absence as an empty reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Role tag, expected to be "assistant".
    pub role: String,
    /// Generated text.
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_serialization() {
        let turn = Turn::system("You are a helpful assistant.");
        let json = serde_json::to_string(&turn).expect("serialize");
        assert_eq!(
            json,
            r#"{"role":"system","content":"You are a helpful assistant."}"#
        );
    }

    #[test]
    fn test_chat_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "hello"},
                    "finish_reason": "stop"
                }
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content.as_deref(), Some("hello"));
    }

    #[test]
    fn test_chat_response_null_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.choices[0].message.content.is_none());
    }
}
