//! HTTP adapter for journal entry endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateEntryRequest, EntryListResponse, EntryResponse, ListEntriesParams, UpdateEntryRequest,
};
pub use handlers::JournalHandlers;
pub use routes::journal_routes;
