//! Model-backed `ChatCompanion`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{AIError, AIProvider, ChatCompanion, CompletionRequest, Message, RequestMetadata};

pub const DEFAULT_CHAT_MODEL: &str = "anthropic/claude-3.5-sonnet";

const CHAT_MAX_TOKENS: u32 = 500;
const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_TOP_P: f32 = 0.9;

/// Sends the whole history behind a fixed companion preamble.
pub struct LlmChatCompanion {
    ai_provider: Arc<dyn AIProvider>,
    model: String,
    title: Option<String>,
}

impl LlmChatCompanion {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            model: DEFAULT_CHAT_MODEL.to_string(),
            title: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// System preamble naming the user.
    pub fn system_prompt(user_name: &str) -> String {
        format!(
            r#"You are a compassionate AI mental health companion. Your role is to:

1. Provide emotional support and active listening
2. Offer evidence-based coping strategies and techniques
3. Encourage professional help when appropriate
4. Be empathetic, non-judgmental, and supportive
5. Ask thoughtful follow-up questions to help users process their feelings
6. Provide practical suggestions for managing stress, anxiety, depression, and other mental health challenges

Important guidelines:
- Always prioritize user safety and wellbeing
- If someone mentions self-harm or suicide, encourage them to contact emergency services or a crisis hotline
- You are not a replacement for professional therapy or medical care
- Be authentic and warm in your responses
- Keep responses concise but meaningful
- The user's name is {}

Respond as a caring mental health companion would."#,
            user_name
        )
    }

    fn build_request(&self, user: &AuthenticatedUser, history: &[ChatMessage]) -> CompletionRequest {
        let messages = history.iter().map(|m| match m.role() {
            ChatRole::User => Message::user(m.content()),
            ChatRole::Assistant => Message::assistant(m.content()),
        });

        let mut request = CompletionRequest::new(RequestMetadata::new(user.id.clone(), "companion"))
            .with_system_prompt(Self::system_prompt(user.preferred_name()))
            .with_messages(messages)
            .with_model(self.model.clone())
            .with_max_tokens(CHAT_MAX_TOKENS)
            .with_temperature(CHAT_TEMPERATURE)
            .with_top_p(CHAT_TOP_P);
        if let Some(ref title) = self.title {
            request = request.with_title(title.clone());
        }
        request
    }
}

#[async_trait]
impl ChatCompanion for LlmChatCompanion {
    async fn reply(
        &self,
        user: &AuthenticatedUser,
        history: &[ChatMessage],
    ) -> Result<String, AIError> {
        let response = self
            .ai_provider
            .complete(self.build_request(user, history))
            .await?;
        Ok(response.content)
    }
}
