//! GetChatSessionHandler - Full session with its message history.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatSession};
use crate::domain::foundation::{ChatSessionId, UserId};
use crate::ports::ChatSessionRepository;

#[derive(Debug, Clone)]
pub struct GetChatSessionQuery {
    pub user_id: UserId,
    pub session_id: ChatSessionId,
}

pub struct GetChatSessionHandler {
    repository: Arc<dyn ChatSessionRepository>,
}

impl GetChatSessionHandler {
    pub fn new(repository: Arc<dyn ChatSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetChatSessionQuery) -> Result<ChatSession, ChatError> {
        self.repository
            .find_by_id(&query.user_id, &query.session_id)
            .await?
            .ok_or_else(|| ChatError::not_found(query.session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatSessionRepository;
    use crate::domain::chat::SessionType;

    #[tokio::test]
    async fn sessions_are_private_to_their_owner() {
        let repo = Arc::new(InMemoryChatSessionRepository::new());
        let session = ChatSession::new(
            ChatSessionId::new(),
            UserId::new("owner").unwrap(),
            None,
            SessionType::MoodAnalysis,
        )
        .unwrap();
        repo.save(&session).await.unwrap();
        let handler = GetChatSessionHandler::new(repo);

        let found = handler
            .handle(GetChatSessionQuery {
                user_id: UserId::new("owner").unwrap(),
                session_id: *session.id(),
            })
            .await
            .unwrap();
        assert_eq!(found.id(), session.id());

        let err = handler
            .handle(GetChatSessionQuery {
                user_id: UserId::new("intruder").unwrap(),
                session_id: *session.id(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Chat session not found");
    }
}
