//! Chat message value object.
//!
//! Messages are immutable once appended to a session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Maximum message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Sender of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single message in a chat session.
///
/// # Invariants
///
/// - `content` is at most 2000 characters
/// - user messages are never blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: ChatRole,
    content: String,
    timestamp: Timestamp,
}

impl ChatMessage {
    /// Creates a user message, rejecting blank or oversized content.
    pub fn user(content: &str) -> Result<Self, ValidationError> {
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ValidationError::too_long("content", MAX_MESSAGE_LENGTH));
        }
        Ok(Self {
            role: ChatRole::User,
            content: content.to_string(),
            timestamp: Timestamp::now(),
        })
    }

    /// Creates an assistant message, truncating content to the length limit.
    pub fn assistant(content: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: truncate_chars(content, MAX_MESSAGE_LENGTH),
            timestamp: Timestamp::now(),
        }
    }

    /// Rebuilds a message from persistence (no validation).
    pub fn reconstitute(role: ChatRole, content: String, timestamp: Timestamp) -> Self {
        Self {
            role,
            content,
            timestamp,
        }
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

/// Cuts `s` to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_rejects_blank() {
        let err = ChatMessage::user(" \n\t ").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("content"));
    }

    #[test]
    fn user_message_accepts_exact_limit() {
        let content = "a".repeat(MAX_MESSAGE_LENGTH);
        assert!(ChatMessage::user(&content).is_ok());
        assert!(ChatMessage::user(&format!("{content}a")).is_err());
    }

    #[test]
    fn assistant_reply_is_truncated_on_char_boundary() {
        let long = "é".repeat(MAX_MESSAGE_LENGTH + 10);
        let msg = ChatMessage::assistant(&long);
        assert_eq!(msg.content().chars().count(), MAX_MESSAGE_LENGTH);
        assert_eq!(msg.role(), ChatRole::Assistant);
    }

    #[test]
    fn short_assistant_reply_is_unchanged() {
        assert_eq!(ChatMessage::assistant("hi").content(), "hi");
    }

    #[test]
    fn serializes_role_in_lowercase() {
        let json = serde_json::to_value(ChatMessage::assistant("hello")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hello");
        assert!(json["timestamp"].is_string());
    }
}
