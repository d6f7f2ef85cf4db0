//! HTTP handlers for journal endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiJson, ApiResponse, ErrorPolicy, MessageResponse};
use crate::application::handlers::journal::{
    CreateEntryHandler, DeleteEntryCommand, DeleteEntryHandler, GetEntryHandler, GetEntryQuery,
    GetJournalStatsHandler, GetJournalStatsQuery, ListEntriesHandler, UpdateEntryCommand,
    UpdateEntryHandler,
};
use crate::domain::foundation::EntryId;
use crate::domain::journal::JournalError;

use super::dto::{
    CreateEntryRequest, EntryListResponse, EntryResponse, ListEntriesParams, UpdateEntryRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct JournalHandlers {
    create_handler: Arc<CreateEntryHandler>,
    list_handler: Arc<ListEntriesHandler>,
    get_handler: Arc<GetEntryHandler>,
    update_handler: Arc<UpdateEntryHandler>,
    delete_handler: Arc<DeleteEntryHandler>,
    stats_handler: Arc<GetJournalStatsHandler>,
    policy: ErrorPolicy,
}

impl JournalHandlers {
    pub fn new(
        create_handler: Arc<CreateEntryHandler>,
        list_handler: Arc<ListEntriesHandler>,
        get_handler: Arc<GetEntryHandler>,
        update_handler: Arc<UpdateEntryHandler>,
        delete_handler: Arc<DeleteEntryHandler>,
        stats_handler: Arc<GetJournalStatsHandler>,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            create_handler,
            list_handler,
            get_handler,
            update_handler,
            delete_handler,
            stats_handler,
            policy,
        }
    }
}

/// A malformed id can never match an entry.
fn parse_entry_id(raw: &str, policy: ErrorPolicy) -> Result<EntryId, ApiError> {
    raw.parse::<EntryId>()
        .map_err(|_| policy.journal(JournalError::unknown_entry(), ""))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/journal
pub async fn create_entry(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<CreateEntryRequest>,
) -> Result<Response, ApiError> {
    let cmd = req.into_command(user.id)?;

    let entry = handlers
        .create_handler
        .handle(cmd)
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while creating journal entry"))?;

    Ok(ApiResponse::ok(EntryResponse::from(&entry)).into_created())
}

/// GET /api/journal
pub async fn list_entries(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListEntriesParams>,
) -> Result<Response, ApiError> {
    let query = params.into_query(user.id)?;

    let listing = handlers
        .list_handler
        .handle(query)
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while fetching journal entries"))?;

    Ok(Json(EntryListResponse::from(listing)).into_response())
}

/// GET /api/journal/stats/overview
pub async fn journal_stats(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    let stats = handlers
        .stats_handler
        .handle(GetJournalStatsQuery { user_id: user.id })
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while fetching statistics"))?;

    Ok(ApiResponse::ok(stats).into_ok())
}

/// GET /api/journal/:id
pub async fn get_entry(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let entry_id = parse_entry_id(&id, handlers.policy)?;

    let entry = handlers
        .get_handler
        .handle(GetEntryQuery {
            user_id: user.id,
            entry_id,
        })
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while fetching journal entry"))?;

    Ok(ApiResponse::ok(EntryResponse::from(&entry)).into_ok())
}

/// PUT /api/journal/:id
pub async fn update_entry(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateEntryRequest>,
) -> Result<Response, ApiError> {
    let entry_id = parse_entry_id(&id, handlers.policy)?;
    let update = req.into_update()?;

    let entry = handlers
        .update_handler
        .handle(UpdateEntryCommand {
            user_id: user.id,
            entry_id,
            update,
        })
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while updating journal entry"))?;

    Ok(ApiResponse::ok(EntryResponse::from(&entry)).into_ok())
}

/// DELETE /api/journal/:id
pub async fn delete_entry(
    State(handlers): State<JournalHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let entry_id = parse_entry_id(&id, handlers.policy)?;

    handlers
        .delete_handler
        .handle(DeleteEntryCommand {
            user_id: user.id,
            entry_id,
        })
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while deleting journal entry"))?;

    Ok(MessageResponse::ok("Journal entry deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_entry_id("not-a-uuid", ErrorPolicy::opaque()).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Journal entry not found");
    }

    #[test]
    fn well_formed_id_parses() {
        let id = EntryId::new();
        assert_eq!(
            parse_entry_id(&id.to_string(), ErrorPolicy::opaque()).unwrap(),
            id
        );
    }
}
