//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresJournalRepository` - Journal entries with JSONB analysis
//! - `PostgresChatSessionRepository` - Chat sessions with JSONB history

mod chat_session_repository;
mod journal_repository;

pub use chat_session_repository::PostgresChatSessionRepository;
pub use journal_repository::PostgresJournalRepository;
