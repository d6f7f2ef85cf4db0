//! In-memory repositories for tests and `memory://` development mode.

mod chat_session_repository;
mod journal_repository;

pub use chat_session_repository::InMemoryChatSessionRepository;
pub use journal_repository::InMemoryJournalRepository;
