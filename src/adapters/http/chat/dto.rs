//! HTTP DTOs for companion chat endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::response::ApiError;
use crate::application::handlers::chat::SendMessageResult;
use crate::domain::chat::{ChatMessage, ChatSession, SessionType};
use crate::domain::foundation::{ChatSessionId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatSessionRequest {
    pub title: Option<String>,
    pub session_type: Option<String>,
}

impl CreateChatSessionRequest {
    /// Absent type means general support; an unknown one is rejected.
    pub fn session_type(&self) -> Result<SessionType, ApiError> {
        match self.session_type.as_deref().map(str::trim) {
            None | Some("") => Ok(SessionType::default()),
            Some(raw) => raw
                .parse::<SessionType>()
                .map_err(|e| ApiError::bad_request(e.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub content: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Per-session context, nested as `context` in responses.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub session_type: SessionType,
}

impl From<&ChatSession> for SessionContext {
    fn from(session: &ChatSession) -> Self {
        Self {
            session_type: session.session_type(),
        }
    }
}

/// Full session including its transcript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSessionResponse {
    pub id: ChatSessionId,
    pub user_id: String,
    pub title: String,
    pub context: SessionContext,
    pub messages: Vec<ChatMessage>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

impl From<&ChatSession> for ChatSessionResponse {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: *session.id(),
            user_id: session.user_id().to_string(),
            title: session.title().to_string(),
            context: SessionContext::from(session),
            messages: session.messages().to_vec(),
            is_active: session.is_active(),
            created_at: *session.created_at(),
            last_activity: *session.last_activity(),
        }
    }
}

/// List view: the transcript is replaced by its length.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSessionSummary {
    pub id: ChatSessionId,
    pub title: String,
    pub context: SessionContext,
    pub message_count: usize,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

impl From<&ChatSession> for ChatSessionSummary {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: *session.id(),
            title: session.title().to_string(),
            context: SessionContext::from(session),
            message_count: session.message_count(),
            is_active: session.is_active(),
            created_at: *session.created_at(),
            last_activity: *session.last_activity(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub session_id: ChatSessionId,
    pub messages: Vec<ChatMessage>,
}

impl From<SendMessageResult> for SendMessageResponse {
    fn from(result: SendMessageResult) -> Self {
        Self {
            session_id: result.session_id,
            messages: result.messages,
        }
    }
}
