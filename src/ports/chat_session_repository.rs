//! Chat session repository port.

use async_trait::async_trait;

use crate::domain::chat::ChatSession;
use crate::domain::foundation::{ChatSessionId, DomainError, UserId};

/// Number of sessions returned by a listing.
pub const SESSION_LIST_LIMIT: u32 = 10;

/// Repository port for chat sessions, scoped by owner.
#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    async fn save(&self, session: &ChatSession) -> Result<(), DomainError>;

    /// Persists the full message history and `last_activity`.
    ///
    /// # Errors
    ///
    /// - `ChatSessionNotFound` if the session was deleted meanwhile
    async fn update(&self, session: &ChatSession) -> Result<(), DomainError>;

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &ChatSessionId,
    ) -> Result<Option<ChatSession>, DomainError>;

    /// Most recently active sessions first, at most `limit`.
    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<ChatSession>, DomainError>;

    /// Deletes a session. Returns false if nothing was deleted.
    async fn delete(&self, user_id: &UserId, id: &ChatSessionId) -> Result<bool, DomainError>;
}
