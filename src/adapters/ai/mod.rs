//! AI Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI-compatible completion endpoint (OpenRouter by default)
//! - `MockAIProvider` - Scripted replies for tests
//! - `LlmEntryAnalyzer` - `EntryAnalyzer` built on any `AIProvider`
//! - `LlmChatCompanion` - `ChatCompanion` built on any `AIProvider`

mod companion;
mod entry_analyzer;
mod mock_provider;
mod openai_provider;

pub use companion::{LlmChatCompanion, DEFAULT_CHAT_MODEL};
pub use entry_analyzer::{LlmEntryAnalyzer, DEFAULT_ANALYSIS_MODEL};
pub use mock_provider::{MockAIProvider, MockError};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL};
