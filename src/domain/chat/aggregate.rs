//! Chat session aggregate.
//!
//! A session holds the full, append-only message history between one user
//! and the wellness companion.

use crate::domain::foundation::{ChatSessionId, Timestamp, UserId, ValidationError};

use super::{ChatMessage, SessionType};

/// Title used when none is supplied.
pub const DEFAULT_SESSION_TITLE: &str = "Mental Health Chat";

/// Maximum length for a session title.
pub const MAX_SESSION_TITLE_LENGTH: usize = 100;

/// First assistant message of every session.
pub const GREETING: &str = "Hello! I'm your AI wellness companion. I'm here to listen, provide support, and help you work through any thoughts or feelings you'd like to discuss. How are you feeling today?";

/// Chat session aggregate.
///
/// # Invariants
///
/// - `messages` is never empty (seeded with the greeting)
/// - `messages` only grows; existing messages are never edited
/// - `last_activity` is at least the timestamp of the newest message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    id: ChatSessionId,
    user_id: UserId,
    title: String,
    session_type: SessionType,
    messages: Vec<ChatMessage>,
    is_active: bool,
    created_at: Timestamp,
    last_activity: Timestamp,
}

impl ChatSession {
    /// Starts a session seeded with the companion greeting.
    ///
    /// # Errors
    ///
    /// - `TooLong` if the title exceeds 100 characters
    pub fn new(
        id: ChatSessionId,
        user_id: UserId,
        title: Option<&str>,
        session_type: SessionType,
    ) -> Result<Self, ValidationError> {
        let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) if t.chars().count() > MAX_SESSION_TITLE_LENGTH => {
                return Err(ValidationError::too_long("title", MAX_SESSION_TITLE_LENGTH));
            }
            Some(t) => t.to_string(),
            None => DEFAULT_SESSION_TITLE.to_string(),
        };

        let greeting = ChatMessage::assistant(GREETING);
        let now = *greeting.timestamp();
        Ok(Self {
            id,
            user_id,
            title,
            session_type,
            messages: vec![greeting],
            is_active: true,
            created_at: now,
            last_activity: now,
        })
    }

    /// Reconstitutes a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ChatSessionId,
        user_id: UserId,
        title: String,
        session_type: SessionType,
        messages: Vec<ChatMessage>,
        is_active: bool,
        created_at: Timestamp,
        last_activity: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            session_type,
            messages,
            is_active,
            created_at,
            last_activity,
        }
    }

    pub fn id(&self) -> &ChatSessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn last_activity(&self) -> &Timestamp {
        &self.last_activity
    }

    /// Appends a message and advances `last_activity`.
    pub fn append_message(&mut self, message: ChatMessage) {
        let now = Timestamp::now();
        let stamp = if message.timestamp().is_after(&now) {
            *message.timestamp()
        } else {
            now
        };
        if stamp.is_after(&self.last_activity) {
            self.last_activity = stamp;
        }
        self.messages.push(message);
    }
}
