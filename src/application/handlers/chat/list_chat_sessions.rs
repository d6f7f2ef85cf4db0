//! ListChatSessionsHandler - Most recently active sessions of a user.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatSession};
use crate::domain::foundation::UserId;
use crate::ports::{ChatSessionRepository, SESSION_LIST_LIMIT};

#[derive(Debug, Clone)]
pub struct ListChatSessionsQuery {
    pub user_id: UserId,
}

pub struct ListChatSessionsHandler {
    repository: Arc<dyn ChatSessionRepository>,
}

impl ListChatSessionsHandler {
    pub fn new(repository: Arc<dyn ChatSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListChatSessionsQuery) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self
            .repository
            .list_recent(&query.user_id, SESSION_LIST_LIMIT)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatSessionRepository;
    use crate::domain::chat::SessionType;
    use crate::domain::foundation::ChatSessionId;

    #[tokio::test]
    async fn returns_at_most_ten_sessions() {
        let repo = Arc::new(InMemoryChatSessionRepository::new());
        let user = UserId::new("user-1").unwrap();
        for i in 0..12 {
            let title = format!("Chat {}", i);
            let session =
                ChatSession::new(ChatSessionId::new(), user.clone(), Some(&title), SessionType::default())
                    .unwrap();
            repo.save(&session).await.unwrap();
        }
        let handler = ListChatSessionsHandler::new(repo);

        let sessions = handler
            .handle(ListChatSessionsQuery { user_id: user })
            .await
            .unwrap();

        assert_eq!(sessions.len(), SESSION_LIST_LIMIT as usize);
        assert!(sessions
            .windows(2)
            .all(|w| w[0].last_activity() >= w[1].last_activity()));
    }
}
