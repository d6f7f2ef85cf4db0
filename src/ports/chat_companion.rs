//! Wellness companion port: produces the next assistant reply in a chat.

use async_trait::async_trait;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::AuthenticatedUser;

use super::AIError;

#[async_trait]
pub trait ChatCompanion: Send + Sync {
    /// Generates a reply to the full history, newest message last.
    async fn reply(
        &self,
        user: &AuthenticatedUser,
        history: &[ChatMessage],
    ) -> Result<String, AIError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_companion_is_object_safe() {
        fn _accepts_dyn(_companion: &dyn ChatCompanion) {}
    }
}
