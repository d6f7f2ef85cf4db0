//! Repositories whose every call fails, for exercising error paths.

use async_trait::async_trait;

use crate::domain::analysis::EntryAnalysis;
use crate::domain::chat::ChatSession;
use crate::domain::foundation::{ChatSessionId, DomainError, EntryId, Timestamp, UserId};
use crate::domain::journal::{JournalEntry, Mood};
use crate::ports::{ChatSessionRepository, EntryFilter, EntryPage, JournalRepository, PageRequest};

fn failure() -> DomainError {
    DomainError::database("Simulated database failure")
}

pub struct FailingJournalRepository;

#[async_trait]
impl JournalRepository for FailingJournalRepository {
    async fn save(&self, _entry: &JournalEntry) -> Result<(), DomainError> {
        Err(failure())
    }

    async fn update(&self, _entry: &JournalEntry) -> Result<(), DomainError> {
        Err(failure())
    }

    async fn update_analysis(
        &self,
        _user_id: &UserId,
        _id: &EntryId,
        _analysis: &EntryAnalysis,
        _updated_at: &Timestamp,
    ) -> Result<(), DomainError> {
        Err(failure())
    }

    async fn find_by_id(
        &self,
        _user_id: &UserId,
        _id: &EntryId,
    ) -> Result<Option<JournalEntry>, DomainError> {
        Err(failure())
    }

    async fn delete(&self, _user_id: &UserId, _id: &EntryId) -> Result<bool, DomainError> {
        Err(failure())
    }

    async fn list(
        &self,
        _user_id: &UserId,
        _filter: &EntryFilter,
        _page: PageRequest,
    ) -> Result<EntryPage, DomainError> {
        Err(failure())
    }

    async fn count(&self, _user_id: &UserId, _since: Option<&Timestamp>) -> Result<u64, DomainError> {
        Err(failure())
    }

    async fn mood_counts(&self, _user_id: &UserId) -> Result<Vec<(Mood, u64)>, DomainError> {
        Err(failure())
    }

    async fn wellness_scores(&self, _user_id: &UserId) -> Result<Vec<u8>, DomainError> {
        Err(failure())
    }

    async fn daily_counts(
        &self,
        _user_id: &UserId,
        _since: &Timestamp,
    ) -> Result<Vec<(String, u64)>, DomainError> {
        Err(failure())
    }

    async fn find_created_between(
        &self,
        _user_id: &UserId,
        _from: &Timestamp,
        _until: Option<&Timestamp>,
    ) -> Result<Vec<JournalEntry>, DomainError> {
        Err(failure())
    }
}

pub struct FailingChatSessionRepository;

#[async_trait]
impl ChatSessionRepository for FailingChatSessionRepository {
    async fn save(&self, _session: &ChatSession) -> Result<(), DomainError> {
        Err(failure())
    }

    async fn update(&self, _session: &ChatSession) -> Result<(), DomainError> {
        Err(failure())
    }

    async fn find_by_id(
        &self,
        _user_id: &UserId,
        _id: &ChatSessionId,
    ) -> Result<Option<ChatSession>, DomainError> {
        Err(failure())
    }

    async fn list_recent(
        &self,
        _user_id: &UserId,
        _limit: u32,
    ) -> Result<Vec<ChatSession>, DomainError> {
        Err(failure())
    }

    async fn delete(&self, _user_id: &UserId, _id: &ChatSessionId) -> Result<bool, DomainError> {
        Err(failure())
    }
}
