//! Chat message domain model.

use serde::{Deserialize, Serialize};

use super::MessageId;

/// A persisted chat message.
///
/// Insertion order is the conversation order; the ID serializes as `mId`,
/// the field name the wire format has always used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID.
    #[serde(rename = "mId")]
    pub id: MessageId,
    /// Message text.
    pub content: String,
    /// Opaque boolean carried through from the client; no business
    /// meaning is attached to it here.
    pub is_stupid_question: bool,
    /// Sender role, conventionally "user" or "assistant".
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serialization_uses_m_id() {
        let message = Message {
            id: MessageId::new(5),
            content: "hi".to_string(),
            is_stupid_question: false,
            role: "user".to_string(),
        };

        let json = serde_json::to_string(&message).expect("serialize");
        assert!(json.contains("\"mId\":5"));
        assert!(!json.contains("\"id\""));
        assert!(json.contains("\"is_stupid_question\":false"));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_message_deserialization() {
        let message: Message =
            serde_json::from_str(r#"{"mId":1,"content":"x","is_stupid_question":true,"role":"user"}"#)
                .expect("deserialize");
        assert_eq!(message.id, MessageId::new(1));
        assert!(message.is_stupid_question);
    }
}
