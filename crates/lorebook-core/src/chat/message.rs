//! Chat message types.
//!
//! This module contains types for representing messages in a chat session,
//! including roles and message content.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// A single message in a chat session.
///
/// Each message carries the id of the session it belongs to, a role
/// (user, assistant, or system), its content, and a timestamp indicating
/// when it was created. Messages are immutable once their turn has
/// finished; the only mutation path is token accumulation while an
/// assistant response is still streaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The id of the session this message belongs to.
    pub chat_id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates a new message stamped with the current time.
    pub fn new(chat_id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_as_snake_case_string() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");

        let role: MessageRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, MessageRole::User);
    }

    #[test]
    fn test_new_message_carries_chat_id() {
        let message = ChatMessage::new("chat-1", MessageRole::User, "hello");
        assert_eq!(message.chat_id, "chat-1");
        assert_eq!(message.content, "hello");
        assert!(!message.timestamp.is_empty());
    }
}
