//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `JournalRepository` - Journal entries and the aggregates analytics needs
//! - `ChatSessionRepository` - Companion chat sessions
//!
//! ## External services
//!
//! - `AIProvider` - OpenAI-compatible completion endpoint
//! - `EntryAnalyzer` - Model-backed journal entry analysis
//! - `ChatCompanion` - Model-backed companion replies
//! - `SessionValidator` - Bearer token validation

mod ai_provider;
mod chat_companion;
mod chat_session_repository;
mod entry_analyzer;
mod journal_repository;
mod session_validator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, RequestMetadata, TokenUsage,
};
pub use chat_companion::ChatCompanion;
pub use chat_session_repository::{ChatSessionRepository, SESSION_LIST_LIMIT};
pub use entry_analyzer::{EntryAnalysisRequest, EntryAnalyzer};
pub use journal_repository::{
    EntryFilter, EntryPage, JournalRepository, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use session_validator::SessionValidator;
