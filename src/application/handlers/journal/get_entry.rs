//! GetEntryHandler - Query handler for a single entry.

use std::sync::Arc;

use crate::domain::foundation::{EntryId, UserId};
use crate::domain::journal::{JournalEntry, JournalError};
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct GetEntryQuery {
    pub user_id: UserId,
    pub entry_id: EntryId,
}

pub struct GetEntryHandler {
    repository: Arc<dyn JournalRepository>,
}

impl GetEntryHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetEntryQuery) -> Result<JournalEntry, JournalError> {
        self.repository
            .find_by_id(&query.user_id, &query.entry_id)
            .await?
            .ok_or_else(|| JournalError::not_found(query.entry_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryJournalRepository;
    use crate::domain::journal::Mood;

    #[tokio::test]
    async fn owner_gets_entry_and_stranger_gets_not_found() {
        let repo = Arc::new(InMemoryJournalRepository::new());
        let entry = JournalEntry::new(
            EntryId::new(),
            UserId::new("owner").unwrap(),
            "Mine",
            "private thoughts".to_string(),
            Mood::Neutral,
            vec![],
            None,
        )
        .unwrap();
        repo.save(&entry).await.unwrap();
        let handler = GetEntryHandler::new(repo);

        let found = handler
            .handle(GetEntryQuery {
                user_id: UserId::new("owner").unwrap(),
                entry_id: *entry.id(),
            })
            .await
            .unwrap();
        assert_eq!(found, entry);

        let err = handler
            .handle(GetEntryQuery {
                user_id: UserId::new("stranger").unwrap(),
                entry_id: *entry.id(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, JournalError::not_found(*entry.id()));
    }
}
