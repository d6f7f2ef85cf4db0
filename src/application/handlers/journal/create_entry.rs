//! CreateEntryHandler - Command handler for writing a new journal entry.

use std::sync::Arc;

use crate::domain::foundation::{EntryId, UserId};
use crate::domain::journal::{JournalEntry, JournalError, Mood};
use crate::ports::JournalRepository;

/// Command to create a journal entry.
#[derive(Debug, Clone)]
pub struct CreateEntryCommand {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub tags: Vec<String>,
    pub is_private: Option<bool>,
}

/// Handler for creating journal entries.
pub struct CreateEntryHandler {
    repository: Arc<dyn JournalRepository>,
}

impl CreateEntryHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateEntryCommand) -> Result<JournalEntry, JournalError> {
        let entry = JournalEntry::new(
            EntryId::new(),
            cmd.user_id,
            &cmd.title,
            cmd.content,
            cmd.mood,
            cmd.tags,
            cmd.is_private,
        )?;

        self.repository.save(&entry).await?;

        tracing::info!(entry_id = %entry.id(), mood = %entry.mood(), "Journal entry created");
        Ok(entry)
    }
}
