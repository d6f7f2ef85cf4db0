//! OpenAI-compatible provider - `AIProvider` over `POST {base}/chat/completions`.
//!
//! Defaults target OpenRouter, which fronts many vendors' models behind the
//! OpenAI wire format and expects `HTTP-Referer` / `X-Title` attribution
//! headers.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("openai/gpt-4o")
//!     .with_referer("https://journal.example.com")
//!     .with_timeout(Duration::from_secs(45));
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    TokenUsage,
};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    /// Model used when a request does not name one.
    pub model: String,
    pub base_url: String,
    /// Sent as `HTTP-Referer`.
    pub referer: Option<String>,
    /// Default `X-Title`; requests may override it.
    pub app_title: Option<String>,
    /// Bounds the whole call. A failed call is not retried; callers fall
    /// back instead.
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "openai/gpt-4o".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: None,
            app_title: None,
            timeout: Duration::from_secs(45),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = Some(title.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible chat completion provider.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Builds the provider and its HTTP client.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to the wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: Some(prompt.clone()),
            });
        }

        for msg in &request.messages {
            messages.push(WireMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: Some(msg.content.clone()),
            });
        }

        ChatCompletionRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let wire = self.to_wire_request(request);

        let mut builder = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json");

        if let Some(ref referer) = self.config.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = request.title.as_ref().or(self.config.app_title.as_ref()) {
            builder = builder.header("X-Title", title);
        }

        builder.json(&wire).send().await.map_err(|e| {
            if e.is_timeout() {
                AIError::Timeout {
                    timeout_secs: self.config.timeout.as_secs() as u32,
                }
            } else if e.is_connect() {
                AIError::network(format!("Connection failed: {}", e))
            } else {
                AIError::network(e.to_string())
            }
        })
    }

    /// Maps non-2xx responses onto `AIError`.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(Self::parse_retry_after(&error_body))),
            400 | 404 | 422 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Reads a "try again in Ns" hint from an error body, defaulting to 30s.
    fn parse_retry_after(error_body: &str) -> u32 {
        let message = serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            });

        message
            .as_deref()
            .and_then(|s| s.find("try again in ").map(|idx| &s[idx + 13..]))
            .and_then(|rest| {
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u32>().ok()
            })
            .unwrap_or(30)
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let wire: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Self::into_completion(wire)
    }

    fn into_completion(wire: ChatCompletionResponse) -> Result<CompletionResponse, AIError> {
        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AIError::parse("Empty message content"))?;

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some("error") => FinishReason::Error,
            _ => FinishReason::Stop,
        };

        let usage = wire
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            usage,
            model: wire.model.unwrap_or_default(),
            finish_reason,
        })
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        let completion = self.parse_response(response).await;
        if let Err(err) = &completion {
            tracing::debug!(
                error = %err,
                purpose = %request.metadata.purpose,
                user_id = %request.metadata.user_id,
                "Completion failed"
            );
        }
        completion
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: Option<String>,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::RequestMetadata;

    fn provider() -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("test-key").with_model("openai/gpt-4o")).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(UserId::new("u").unwrap(), "analysis"))
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("anthropic/claude-3.5-sonnet")
            .with_base_url("https://custom.api.com/v1")
            .with_referer("http://localhost:3001")
            .with_app_title("Journal")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "anthropic/claude-3.5-sonnet");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.referer.as_deref(), Some("http://localhost:3001"));
        assert_eq!(config.app_title.as_deref(), Some("Journal"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn defaults_target_openrouter() {
        let config = OpenAIConfig::new("k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(45));
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_after_one_attempt() {
        // Nothing listens on the discard port; the connect error surfaces
        // straight away instead of being retried with backoff.
        let provider = OpenAIProvider::new(
            OpenAIConfig::new("k")
                .with_base_url("http://127.0.0.1:9/v1")
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap();

        let started = std::time::Instant::now();
        let result = provider.complete(request()).await;
        assert!(matches!(
            result,
            Err(AIError::Network(_)) | Err(AIError::Timeout { .. })
        ));
        assert!(started.elapsed() < Duration::from_secs(6));
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let p = OpenAIProvider::new(OpenAIConfig::new("k").with_base_url("http://x/v1/")).unwrap();
        assert_eq!(p.completions_url(), "http://x/v1/chat/completions");
    }

    #[test]
    fn wire_request_puts_system_prompt_first() {
        let wire = provider().to_wire_request(
            &request()
                .with_system_prompt("system text")
                .with_message(MessageRole::User, "hi")
                .with_message(MessageRole::Assistant, "hello")
                .with_top_p(0.9),
        );

        let roles: Vec<_> = wire.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
        assert_eq!(wire.model, "openai/gpt-4o");
        assert_eq!(wire.top_p, Some(0.9));
    }

    #[test]
    fn request_model_overrides_default() {
        let wire = provider().to_wire_request(&request().with_model("anthropic/claude-3.5-sonnet"));
        assert_eq!(wire.model, "anthropic/claude-3.5-sonnet");
    }

    #[test]
    fn wire_request_omits_unset_sampling_fields() {
        let json = serde_json::to_value(provider().to_wire_request(&request())).unwrap();
        assert!(json.get("top_p").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn into_completion_reads_first_choice() {
        let wire: ChatCompletionResponse = serde_json::from_str(
            r#"{"model":"openai/gpt-4o","choices":[{"message":{"role":"assistant","content":"Hi"},"finish_reason":"length"}],"usage":{"prompt_tokens":10,"completion_tokens":5}}"#,
        )
        .unwrap();

        let completion = OpenAIProvider::into_completion(wire).unwrap();
        assert_eq!(completion.content, "Hi");
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert_eq!(completion.usage.total_tokens, 15);
    }

    #[test]
    fn into_completion_rejects_missing_content() {
        let wire: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            OpenAIProvider::into_completion(wire),
            Err(AIError::Parse(_))
        ));

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(OpenAIProvider::into_completion(empty).is_err());
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 12 seconds."}}"#;
        assert_eq!(OpenAIProvider::parse_retry_after(error), 12);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(OpenAIProvider::parse_retry_after("not json"), 30);
    }
}
