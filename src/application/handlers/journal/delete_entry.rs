//! DeleteEntryHandler - Command handler for removing an entry and its analysis.

use std::sync::Arc;

use crate::domain::foundation::{EntryId, UserId};
use crate::domain::journal::JournalError;
use crate::ports::JournalRepository;

#[derive(Debug, Clone)]
pub struct DeleteEntryCommand {
    pub user_id: UserId,
    pub entry_id: EntryId,
}

pub struct DeleteEntryHandler {
    repository: Arc<dyn JournalRepository>,
}

impl DeleteEntryHandler {
    pub fn new(repository: Arc<dyn JournalRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteEntryCommand) -> Result<(), JournalError> {
        if !self.repository.delete(&cmd.user_id, &cmd.entry_id).await? {
            return Err(JournalError::not_found(cmd.entry_id));
        }
        tracing::info!(entry_id = %cmd.entry_id, "Journal entry deleted");
        Ok(())
    }
}
