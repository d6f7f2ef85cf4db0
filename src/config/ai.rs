//! AI provider configuration (OpenAI-compatible endpoint)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// External model settings. Each call is bounded by a fixed 45 s timeout and
/// is never retried, so neither is configurable here.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key; unset disables the external model and every analysis or
    /// reply comes from the local fallbacks
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_analysis_model")]
    pub analysis_model: String,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Sent as `HTTP-Referer`
    #[serde(default = "default_referer_url")]
    pub referer_url: String,

    /// Prefix for the `X-Title` header
    #[serde(default = "default_app_title")]
    pub app_title: String,
}

impl AiConfig {
    /// The key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn analysis_title(&self) -> String {
        format!("{} - AI Analysis", self.app_title)
    }

    pub fn companion_title(&self) -> String {
        format!("{} - AI Companion", self.app_title)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            analysis_model: default_analysis_model(),
            chat_model: default_chat_model(),
            referer_url: default_referer_url(),
            app_title: default_app_title(),
        }
    }
}

fn default_base_url() -> String {
    crate::adapters::ai::DEFAULT_BASE_URL.to_string()
}

fn default_analysis_model() -> String {
    crate::adapters::ai::DEFAULT_ANALYSIS_MODEL.to_string()
}

fn default_chat_model() -> String {
    crate::adapters::ai::DEFAULT_CHAT_MODEL.to_string()
}

fn default_referer_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_app_title() -> String {
    "Mental Health Journal".to_string()
}
