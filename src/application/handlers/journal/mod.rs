//! Journal entry command and query handlers.

mod create_entry;
mod delete_entry;
mod get_entry;
mod get_stats;
mod list_entries;
mod update_entry;

pub use create_entry::{CreateEntryCommand, CreateEntryHandler};
pub use delete_entry::{DeleteEntryCommand, DeleteEntryHandler};
pub use get_entry::{GetEntryHandler, GetEntryQuery};
pub use get_stats::{GetJournalStatsHandler, GetJournalStatsQuery};
pub use list_entries::{EntryListing, ListEntriesHandler, ListEntriesQuery, Pagination};
pub use update_entry::{UpdateEntryCommand, UpdateEntryHandler};
