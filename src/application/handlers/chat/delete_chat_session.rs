//! DeleteChatSessionHandler - Removes a session and its history.

use std::sync::Arc;

use crate::domain::chat::ChatError;
use crate::domain::foundation::{ChatSessionId, UserId};
use crate::ports::ChatSessionRepository;

#[derive(Debug, Clone)]
pub struct DeleteChatSessionCommand {
    pub user_id: UserId,
    pub session_id: ChatSessionId,
}

pub struct DeleteChatSessionHandler {
    repository: Arc<dyn ChatSessionRepository>,
}

impl DeleteChatSessionHandler {
    pub fn new(repository: Arc<dyn ChatSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteChatSessionCommand) -> Result<(), ChatError> {
        if !self.repository.delete(&cmd.user_id, &cmd.session_id).await? {
            return Err(ChatError::not_found(cmd.session_id));
        }
        tracing::info!(session_id = %cmd.session_id, "Chat session deleted");
        Ok(())
    }
}
