//! CreateChatSessionHandler - Starts a companion chat seeded with the greeting.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatSession, SessionType};
use crate::domain::foundation::{ChatSessionId, UserId};
use crate::ports::ChatSessionRepository;

#[derive(Debug, Clone)]
pub struct CreateChatSessionCommand {
    pub user_id: UserId,
    pub title: Option<String>,
    pub session_type: SessionType,
}

pub struct CreateChatSessionHandler {
    repository: Arc<dyn ChatSessionRepository>,
}

impl CreateChatSessionHandler {
    pub fn new(repository: Arc<dyn ChatSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateChatSessionCommand) -> Result<ChatSession, ChatError> {
        let session = ChatSession::new(
            ChatSessionId::new(),
            cmd.user_id,
            cmd.title.as_deref(),
            cmd.session_type,
        )?;

        self.repository.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            session_type = %session.session_type(),
            "Chat session created"
        );
        Ok(session)
    }
}
