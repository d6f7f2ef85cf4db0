//! In-memory chat session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chat::ChatSession;
use crate::domain::foundation::{ChatSessionId, DomainError, ErrorCode, UserId};
use crate::ports::ChatSessionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryChatSessionRepository {
    sessions: Arc<RwLock<HashMap<ChatSessionId, ChatSession>>>,
}

impl InMemoryChatSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryChatSessionRepository {
    async fn save(&self, session: &ChatSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &ChatSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session.id()) {
            Some(stored) if stored.user_id() == session.user_id() => {
                *stored = session.clone();
                Ok(())
            }
            _ => Err(DomainError::new(
                ErrorCode::ChatSessionNotFound,
                format!("Chat session not found: {}", session.id()),
            )),
        }
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &ChatSessionId,
    ) -> Result<Option<ChatSession>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(id)
            .filter(|s| s.user_id() == user_id)
            .cloned())
    }

    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<ChatSession>, DomainError> {
        let mut owned: Vec<ChatSession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.last_activity().cmp(a.last_activity()));
        owned.truncate(limit as usize);
        Ok(owned)
    }

    async fn delete(&self, user_id: &UserId, id: &ChatSessionId) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(id) {
            Some(s) if s.user_id() == user_id => {
                sessions.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::{ChatMessage, SessionType};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn session(owner: &str, title: &str) -> ChatSession {
        ChatSession::new(ChatSessionId::new(), user(owner), Some(title), SessionType::default())
            .unwrap()
    }

    #[tokio::test]
    async fn list_orders_by_last_activity_and_limits() {
        let repo = InMemoryChatSessionRepository::new();
        let first = session("alice", "first");
        let mut second = session("alice", "second");
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();
        repo.save(&session("bob", "other")).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        second.append_message(ChatMessage::user("hello").unwrap());
        repo.update(&second).await.unwrap();

        let listed = repo.list_recent(&user("alice"), 10).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["second", "first"]);

        assert_eq!(repo.list_recent(&user("alice"), 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn other_users_cannot_see_or_delete() {
        let repo = InMemoryChatSessionRepository::new();
        let s = session("alice", "mine");
        repo.save(&s).await.unwrap();

        assert!(repo.find_by_id(&user("bob"), s.id()).await.unwrap().is_none());
        assert!(!repo.delete(&user("bob"), s.id()).await.unwrap());
        assert!(repo.delete(&user("alice"), s.id()).await.unwrap());
    }

    #[tokio::test]
    async fn update_after_delete_is_not_found() {
        let repo = InMemoryChatSessionRepository::new();
        let s = session("alice", "gone");
        repo.save(&s).await.unwrap();
        repo.delete(&user("alice"), s.id()).await.unwrap();

        let err = repo.update(&s).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ChatSessionNotFound);
    }
}
