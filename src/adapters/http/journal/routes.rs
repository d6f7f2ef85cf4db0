//! HTTP routes for journal endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_entry, delete_entry, get_entry, journal_stats, list_entries, update_entry,
    JournalHandlers,
};

/// Creates the journal router, mounted at `/api/journal`.
pub fn journal_routes(handlers: JournalHandlers) -> Router {
    Router::new()
        .route("/", post(create_entry).get(list_entries))
        .route("/stats/overview", get(journal_stats))
        .route("/:id", get(get_entry).put(update_entry).delete(delete_entry))
        .with_state(handlers)
}
