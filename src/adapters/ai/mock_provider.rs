//! Scripted `AIProvider` for tests.
//!
//! Replies are consumed in the order they were queued; once the script runs
//! out every call gets a generic reply. Every request is recorded.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, TokenUsage,
};

const FALLBACK_REPLY: &str = "Mock response";

#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<Result<String, MockError>>>>,
    latency: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// Failures a scripted call can produce.
#[derive(Debug, Clone)]
pub enum MockError {
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
        }
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(Ok(content.into()));
        self
    }

    pub fn with_error(self, error: MockError) -> Self {
        self.push(Err(error));
        self
    }

    /// Every call sleeps this long before answering.
    pub fn with_delay(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, step: Result<String, MockError>) {
        self.script.lock().unwrap().push_back(step);
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let model = request.model.clone().unwrap_or_else(|| "mock-model".to_string());
        self.calls.lock().unwrap().push(request);

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(FALLBACK_REPLY.to_string()));

        let content = step?;
        Ok(CompletionResponse {
            content,
            usage: TokenUsage::new(10, 20),
            model,
            finish_reason: FinishReason::Stop,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::RequestMetadata;

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(UserId::new("u").unwrap(), "test"))
    }

    #[tokio::test]
    async fn replays_script_then_falls_back() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_error(MockError::Unavailable {
                message: "down".to_string(),
            })
            .with_response("third");

        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert!(matches!(
            provider.complete(request()).await,
            Err(AIError::Unavailable { .. })
        ));
        assert_eq!(provider.complete(request()).await.unwrap().content, "third");
        assert_eq!(provider.complete(request()).await.unwrap().content, FALLBACK_REPLY);
        assert_eq!(provider.call_count(), 4);
    }

    #[tokio::test]
    async fn records_requests() {
        let provider = MockAIProvider::new();
        provider
            .complete(request().with_model("openai/gpt-4o").with_max_tokens(800))
            .await
            .unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model.as_deref(), Some("openai/gpt-4o"));
        assert_eq!(calls[0].max_tokens, Some(800));
    }

    #[tokio::test]
    async fn delay_holds_the_reply_back() {
        let provider = MockAIProvider::new()
            .with_response("late")
            .with_delay(Duration::from_millis(50));

        let started = tokio::time::Instant::now();
        let reply = provider.complete(request()).await.unwrap();
        assert_eq!(reply.content, "late");
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
