//! UpdateEntryHandler - Command handler for editing an entry.
//!
//! Only the user-editable fields are written; a stored analysis is left as
//! it is even though the text it describes may have changed.

use std::sync::Arc;

use crate::domain::foundation::{EntryId, UserId};
use crate::domain::journal::{EntryUpdate, JournalEntry, JournalError};
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct UpdateEntryCommand {
    pub user_id: UserId,
    pub entry_id: EntryId,
    pub update: EntryUpdate,
}

pub struct UpdateEntryHandler {
    repository: Arc<dyn JournalRepository>,
}

impl UpdateEntryHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateEntryCommand) -> Result<JournalEntry, JournalError> {
        let mut entry = self
            .repository
            .find_by_id(&cmd.user_id, &cmd.entry_id)
            .await?
            .ok_or_else(|| JournalError::not_found(cmd.entry_id))?;

        entry.apply_update(cmd.update)?;
        self.repository.update(&entry).await?;

        tracing::info!(entry_id = %entry.id(), "Journal entry updated");
        Ok(entry)
    }
}
