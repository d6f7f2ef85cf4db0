//! SendMessageHandler - Appends a user message and the companion's reply.
//!
//! The reply comes from the companion model when it is configured and
//! answers in time; otherwise a canned reply for the session type is used.
//! Either way both messages are persisted and the full history returned.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::chat::{fallback_reply_with, ChatError, ChatMessage, ChatSession};
use crate::domain::foundation::{AuthenticatedUser, ChatSessionId};
use crate::ports::{ChatCompanion, ChatSessionRepository};

/// Upper bound on one companion call.
pub const COMPANION_TIMEOUT: Duration = Duration::from_secs(45);

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub user: AuthenticatedUser,
    pub session_id: ChatSessionId,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub session_id: ChatSessionId,
    pub messages: Vec<ChatMessage>,
    /// True when the reply is a canned fallback.
    pub used_fallback: bool,
}

pub struct SendMessageHandler {
    repository: Arc<dyn ChatSessionRepository>,
    companion: Option<Arc<dyn ChatCompanion>>,
    timeout: Duration,
}

impl SendMessageHandler {
    pub fn new(
        repository: Arc<dyn ChatSessionRepository>,
        companion: Option<Arc<dyn ChatCompanion>>,
    ) -> Self {
        Self {
            repository,
            companion,
            timeout: COMPANION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, ChatError> {
        if cmd.content.trim().is_empty() {
            return Err(ChatError::validation("content", "Message content is required"));
        }
        let message = ChatMessage::user(&cmd.content)?;

        let mut session = self
            .repository
            .find_by_id(&cmd.user.id, &cmd.session_id)
            .await?
            .ok_or_else(|| ChatError::not_found(cmd.session_id))?;

        session.append_message(message);

        let (reply, used_fallback) = match self.companion_reply(&cmd.user, &session).await {
            Some(reply) => (reply, false),
            None => {
                let canned =
                    fallback_reply_with(session.session_type(), &mut rand::thread_rng());
                tracing::info!(
                    session_id = %cmd.session_id,
                    session_type = %session.session_type(),
                    "Using fallback companion reply"
                );
                (canned.to_string(), true)
            }
        };
        session.append_message(ChatMessage::assistant(&reply));

        self.repository.update(&session).await.map_err(|e| match ChatError::from(e) {
            ChatError::NotFound(_) => ChatError::not_found(cmd.session_id),
            other => other,
        })?;

        Ok(SendMessageResult {
            session_id: cmd.session_id,
            messages: session.messages().to_vec(),
            used_fallback,
        })
    }

    /// Returns `None` on any failure; the caller falls back.
    async fn companion_reply(
        &self,
        user: &AuthenticatedUser,
        session: &ChatSession,
    ) -> Option<String> {
        let companion = self.companion.as_ref()?;

        match tokio::time::timeout(self.timeout, companion.reply(user, session.messages())).await {
            Ok(Ok(reply)) if !reply.trim().is_empty() => Some(reply),
            Ok(Ok(_)) => {
                tracing::warn!(session_id = %session.id(), "Companion returned an empty reply");
                None
            }
            Ok(Err(error)) => {
                tracing::warn!(session_id = %session.id(), error = %error, "Companion call failed");
                None
            }
            Err(_) => {
                tracing::warn!(session_id = %session.id(), "Companion call timed out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryChatSessionRepository;
    use crate::domain::chat::{replies_for, ChatRole, SessionType, MAX_MESSAGE_LENGTH};
    use crate::domain::foundation::UserId;
    use crate::ports::AIError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedCompanion {
        reply: Result<String, ()>,
        seen: Mutex<Vec<usize>>,
    }

    impl ScriptedCompanion {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            })
        }

        /// History lengths seen by each call.
        fn seen(&self) -> Vec<usize> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatCompanion for ScriptedCompanion {
        async fn reply(
            &self,
            _user: &AuthenticatedUser,
            history: &[ChatMessage],
        ) -> Result<String, AIError> {
            self.seen.lock().unwrap().push(history.len());
            self.reply
                .clone()
                .map_err(|_| AIError::unavailable("companion down"))
        }
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user-1").unwrap(), Some("Ada".to_string()), None)
    }

    async fn setup(session_type: SessionType) -> (Arc<InMemoryChatSessionRepository>, ChatSessionId) {
        let repo = Arc::new(InMemoryChatSessionRepository::new());
        let session = ChatSession::new(ChatSessionId::new(), user().id, None, session_type).unwrap();
        repo.save(&session).await.unwrap();
        (repo, *session.id())
    }

    fn command(session_id: ChatSessionId, content: &str) -> SendMessageCommand {
        SendMessageCommand {
            user: user(),
            session_id,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn appends_user_message_and_companion_reply() {
        let (repo, id) = setup(SessionType::GeneralSupport).await;
        let companion = ScriptedCompanion::replying("That sounds hard. Tell me more?");
        let handler = SendMessageHandler::new(repo.clone(), Some(companion.clone()));

        let result = handler.handle(command(id, "Work was rough")).await.unwrap();

        assert!(!result.used_fallback);
        assert_eq!(result.messages.len(), 3);
        assert_eq!(result.messages[1].role(), ChatRole::User);
        assert_eq!(result.messages[1].content(), "Work was rough");
        assert_eq!(result.messages[2].content(), "That sounds hard. Tell me more?");
        // Greeting plus the new user message.
        assert_eq!(companion.seen(), vec![2]);

        let stored = repo.find_by_id(&user().id, &id).await.unwrap().unwrap();
        assert_eq!(stored.messages(), result.messages.as_slice());
    }

    #[tokio::test]
    async fn failing_companion_uses_fallback_for_session_type() {
        let (repo, id) = setup(SessionType::CrisisIntervention).await;
        let handler = SendMessageHandler::new(repo, Some(ScriptedCompanion::failing()));

        let result = handler.handle(command(id, "I can't cope")).await.unwrap();

        assert!(result.used_fallback);
        let reply = result.messages.last().unwrap();
        assert_eq!(reply.role(), ChatRole::Assistant);
        assert!(replies_for(SessionType::CrisisIntervention).contains(&reply.content()));
    }

    #[tokio::test]
    async fn unconfigured_companion_uses_fallback() {
        let (repo, id) = setup(SessionType::MoodAnalysis).await;
        let handler = SendMessageHandler::new(repo, None);

        let result = handler.handle(command(id, "hello")).await.unwrap();
        assert!(result.used_fallback);
        assert!(replies_for(SessionType::MoodAnalysis)
            .contains(&result.messages.last().unwrap().content()));
    }

    #[tokio::test]
    async fn long_reply_is_truncated() {
        let (repo, id) = setup(SessionType::GeneralSupport).await;
        let long = "é".repeat(MAX_MESSAGE_LENGTH + 50);
        let handler = SendMessageHandler::new(repo, Some(ScriptedCompanion::replying(&long)));

        let result = handler.handle(command(id, "hi")).await.unwrap();
        let reply = result.messages.last().unwrap().content();
        assert_eq!(reply.chars().count(), MAX_MESSAGE_LENGTH);
    }

    #[tokio::test]
    async fn blank_message_is_rejected_before_lookup() {
        let (repo, _) = setup(SessionType::GeneralSupport).await;
        let handler = SendMessageHandler::new(repo, None);

        let err = handler
            .handle(command(ChatSessionId::new(), "   "))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Message content is required");
    }

    #[tokio::test]
    async fn overlong_message_is_rejected() {
        let (repo, id) = setup(SessionType::GeneralSupport).await;
        let handler = SendMessageHandler::new(repo, None);

        let err = handler
            .handle(command(id, &"a".repeat(MAX_MESSAGE_LENGTH + 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (repo, _) = setup(SessionType::GeneralSupport).await;
        let handler = SendMessageHandler::new(repo, None);
        let missing = ChatSessionId::new();

        let err = handler.handle(command(missing, "hello")).await.unwrap_err();
        assert_eq!(err, ChatError::not_found(missing));
    }
}
