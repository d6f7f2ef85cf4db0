//! In-memory journal repository for testing and `memory://` development mode.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analysis::EntryAnalysis;
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, Timestamp, UserId};
use crate::domain::journal::{JournalEntry, Mood};
use crate::ports::{EntryFilter, EntryPage, JournalRepository, PageRequest};

/// Journal entries held in a map keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJournalRepository {
    entries: Arc<RwLock<HashMap<EntryId, JournalEntry>>>,
}

impl InMemoryJournalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry as-is, bypassing `save`. Lets tests seed entries with
    /// chosen timestamps or partial analyses.
    pub async fn insert(&self, entry: JournalEntry) {
        self.entries.write().await.insert(*entry.id(), entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Owned entries, newest first.
    async fn owned_by(&self, user_id: &UserId) -> Vec<JournalEntry> {
        let mut owned: Vec<JournalEntry> = self
            .entries
            .read()
            .await
            .values()
            .filter(|e| e.is_owner(user_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        owned
    }
}

fn not_found(id: &EntryId) -> DomainError {
    DomainError::new(
        ErrorCode::EntryNotFound,
        format!("Journal entry not found: {}", id),
    )
}

#[async_trait]
impl JournalRepository for InMemoryJournalRepository {
    async fn save(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        self.entries.write().await.insert(*entry.id(), entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &JournalEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let stored = entries
            .get_mut(entry.id())
            .filter(|e| e.is_owner(entry.user_id()))
            .ok_or_else(|| not_found(entry.id()))?;

        // Keep whatever analysis was stored meanwhile.
        let analysis = stored.analysis().cloned();
        *stored = JournalEntry::reconstitute(
            *entry.id(),
            entry.user_id().clone(),
            entry.title().to_string(),
            entry.content().to_string(),
            entry.mood(),
            entry.tags().to_vec(),
            entry.is_private(),
            analysis,
            *stored.created_at(),
            *entry.updated_at(),
        );
        Ok(())
    }

    async fn update_analysis(
        &self,
        user_id: &UserId,
        id: &EntryId,
        analysis: &EntryAnalysis,
        updated_at: &Timestamp,
    ) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let stored = entries
            .get_mut(id)
            .filter(|e| e.is_owner(user_id))
            .ok_or_else(|| not_found(id))?;

        let updated_at = (*stored.updated_at()).max(*updated_at);
        *stored = JournalEntry::reconstitute(
            *stored.id(),
            stored.user_id().clone(),
            stored.title().to_string(),
            stored.content().to_string(),
            stored.mood(),
            stored.tags().to_vec(),
            stored.is_private(),
            Some(analysis.clone()),
            *stored.created_at(),
            updated_at,
        );
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &EntryId,
    ) -> Result<Option<JournalEntry>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .get(id)
            .filter(|e| e.is_owner(user_id))
            .cloned())
    }

    async fn delete(&self, user_id: &UserId, id: &EntryId) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get(id) {
            Some(entry) if entry.is_owner(user_id) => {
                entries.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list(
        &self,
        user_id: &UserId,
        filter: &EntryFilter,
        page: PageRequest,
    ) -> Result<EntryPage, DomainError> {
        let matching: Vec<JournalEntry> = self
            .owned_by(user_id)
            .await
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();
        let total = matching.len() as u64;
        let entries = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();

        Ok(EntryPage { entries, total })
    }

    async fn count(&self, user_id: &UserId, since: Option<&Timestamp>) -> Result<u64, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .values()
            .filter(|e| e.is_owner(user_id))
            .filter(|e| since.map_or(true, |s| !e.created_at().is_before(s)))
            .count() as u64)
    }

    async fn mood_counts(&self, user_id: &UserId) -> Result<Vec<(Mood, u64)>, DomainError> {
        let entries = self.entries.read().await;
        let mut counts: HashMap<Mood, u64> = HashMap::new();
        for entry in entries.values().filter(|e| e.is_owner(user_id)) {
            *counts.entry(entry.mood()).or_default() += 1;
        }
        Ok(Mood::ALL
            .iter()
            .filter_map(|m| counts.get(m).map(|c| (*m, *c)))
            .collect())
    }

    async fn wellness_scores(&self, user_id: &UserId) -> Result<Vec<u8>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .values()
            .filter(|e| e.is_owner(user_id))
            .filter_map(|e| e.wellness_score())
            .collect())
    }

    async fn daily_counts(
        &self,
        user_id: &UserId,
        since: &Timestamp,
    ) -> Result<Vec<(String, u64)>, DomainError> {
        let entries = self.entries.read().await;
        let mut days: BTreeMap<String, u64> = BTreeMap::new();
        for entry in entries
            .values()
            .filter(|e| e.is_owner(user_id) && !e.created_at().is_before(since))
        {
            *days.entry(entry.created_at().date_string()).or_default() += 1;
        }
        Ok(days.into_iter().collect())
    }

    async fn find_created_between(
        &self,
        user_id: &UserId,
        from: &Timestamp,
        until: Option<&Timestamp>,
    ) -> Result<Vec<JournalEntry>, DomainError> {
        let mut found: Vec<JournalEntry> = self
            .owned_by(user_id)
            .await
            .into_iter()
            .filter(|e| !e.created_at().is_before(from))
            .filter(|e| until.map_or(true, |u| e.created_at().is_before(u)))
            .collect();
        found.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn entry_at(owner: &str, mood: Mood, days_ago: i64) -> JournalEntry {
        let created = Timestamp::now().minus_days(days_ago);
        JournalEntry::reconstitute(
            EntryId::new(),
            user(owner),
            format!("Entry {}", days_ago),
            "Some content".to_string(),
            mood,
            vec![],
            true,
            None,
            created,
            created,
        )
    }

    #[tokio::test]
    async fn lookups_are_scoped_to_owner() {
        let repo = InMemoryJournalRepository::new();
        let entry = entry_at("alice", Mood::Happy, 0);
        let id = *entry.id();
        repo.save(&entry).await.unwrap();

        assert!(repo.find_by_id(&user("alice"), &id).await.unwrap().is_some());
        assert!(repo.find_by_id(&user("bob"), &id).await.unwrap().is_none());
        assert!(!repo.delete(&user("bob"), &id).await.unwrap());
        assert!(repo.delete(&user("alice"), &id).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn list_pages_newest_first() {
        let repo = InMemoryJournalRepository::new();
        for days in 0..5 {
            repo.insert(entry_at("alice", Mood::Neutral, days)).await;
        }
        repo.insert(entry_at("bob", Mood::Neutral, 0)).await;

        let page = repo
            .list(&user("alice"), &EntryFilter::default(), PageRequest::new(Some(2), Some(2)))
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        let titles: Vec<_> = page.entries.iter().map(|e| e.title().to_string()).collect();
        assert_eq!(titles, vec!["Entry 2", "Entry 3"]);
    }

    #[tokio::test]
    async fn daily_counts_bucket_by_day_within_window() {
        let repo = InMemoryJournalRepository::new();
        repo.insert(entry_at("alice", Mood::Happy, 1)).await;
        repo.insert(entry_at("alice", Mood::Sad, 1)).await;
        repo.insert(entry_at("alice", Mood::Sad, 3)).await;
        repo.insert(entry_at("alice", Mood::Sad, 12)).await;
        repo.insert(entry_at("bob", Mood::Sad, 1)).await;

        let since = Timestamp::now().minus_days(7);
        let days = repo.daily_counts(&user("alice"), &since).await.unwrap();

        let three_days_ago = Timestamp::now().minus_days(3).date_string();
        let yesterday = Timestamp::now().minus_days(1).date_string();
        assert_eq!(days, vec![(three_days_ago, 1), (yesterday, 2)]);
    }

    #[tokio::test]
    async fn update_preserves_concurrently_stored_analysis() {
        let repo = InMemoryJournalRepository::new();
        let mut entry = entry_at("alice", Mood::Sad, 0);
        repo.save(&entry).await.unwrap();

        let analysis = EntryAnalysis {
            wellness_score: Some(30),
            ..Default::default()
        };
        repo.update_analysis(&user("alice"), entry.id(), &analysis, &Timestamp::now())
            .await
            .unwrap();

        entry
            .apply_update(crate::domain::journal::EntryUpdate {
                title: Some("Renamed".to_string()),
                ..Default::default()
            })
            .unwrap();
        repo.update(&entry).await.unwrap();

        let stored = repo.find_by_id(&user("alice"), entry.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), "Renamed");
        assert_eq!(stored.wellness_score(), Some(30));
    }

    #[tokio::test]
    async fn update_analysis_on_missing_entry_is_not_found() {
        let repo = InMemoryJournalRepository::new();
        let err = repo
            .update_analysis(
                &user("alice"),
                &EntryId::new(),
                &EntryAnalysis::default(),
                &Timestamp::now(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EntryNotFound);
    }

    #[tokio::test]
    async fn aggregates_cover_only_owner() {
        let repo = InMemoryJournalRepository::new();
        repo.insert(entry_at("alice", Mood::Happy, 0)).await;
        repo.insert(entry_at("alice", Mood::Happy, 40)).await;
        repo.insert(entry_at("alice", Mood::Sad, 1)).await;
        repo.insert(entry_at("bob", Mood::VerySad, 0)).await;

        let since = Timestamp::now().minus_days(7);
        assert_eq!(repo.count(&user("alice"), None).await.unwrap(), 3);
        assert_eq!(repo.count(&user("alice"), Some(&since)).await.unwrap(), 2);
        assert_eq!(
            repo.mood_counts(&user("alice")).await.unwrap(),
            vec![(Mood::Sad, 1), (Mood::Happy, 2)]
        );

        let window = repo
            .find_created_between(&user("alice"), &since, None)
            .await
            .unwrap();
        assert_eq!(window.len(), 2);
        assert!(window[0].created_at() < window[1].created_at());
    }
}
