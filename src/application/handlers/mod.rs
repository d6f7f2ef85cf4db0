//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler owns its port dependencies as `Arc<dyn Port>` and exposes a
//! single `handle` method.

pub mod analysis;
pub mod analytics;
pub mod chat;
pub mod journal;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{
    AnalysisSource, AnalyzeEntryCommand, AnalyzeEntryHandler, AnalyzeEntryResult,
    GetScoreHistoryHandler, GetScoreHistoryQuery, ANALYSIS_TIMEOUT,
};
pub use analytics::{
    GetInsightsHandler, GetInsightsQuery, GetOverviewHandler, GetOverviewQuery, GetTrendsHandler,
    GetTrendsQuery,
};
pub use chat::{
    CreateChatSessionCommand, CreateChatSessionHandler, DeleteChatSessionCommand,
    DeleteChatSessionHandler, GetChatSessionHandler, GetChatSessionQuery, ListChatSessionsHandler,
    ListChatSessionsQuery, SendMessageCommand, SendMessageHandler, SendMessageResult,
    COMPANION_TIMEOUT,
};
pub use journal::{
    CreateEntryCommand, CreateEntryHandler, DeleteEntryCommand, DeleteEntryHandler, EntryListing,
    GetEntryHandler, GetEntryQuery, GetJournalStatsHandler, GetJournalStatsQuery,
    ListEntriesHandler, ListEntriesQuery, Pagination,
    UpdateEntryCommand, UpdateEntryHandler,
};
