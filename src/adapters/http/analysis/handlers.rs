//! HTTP handlers for analysis endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use crate::adapters::http::analytics::TrendsParams;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiResponse, ErrorPolicy};
use crate::application::handlers::analysis::{
    AnalyzeEntryCommand, AnalyzeEntryHandler, GetScoreHistoryHandler, GetScoreHistoryQuery,
};
use crate::domain::foundation::EntryId;
use crate::domain::journal::JournalError;

use super::dto::AnalysisResponse;

const ANALYSIS_FAILED_MESSAGE: &str = "Server error during analysis";

#[derive(Clone)]
pub struct AnalysisHandlers {
    analyze_handler: Arc<AnalyzeEntryHandler>,
    history_handler: Arc<GetScoreHistoryHandler>,
    policy: ErrorPolicy,
}

impl AnalysisHandlers {
    pub fn new(
        analyze_handler: Arc<AnalyzeEntryHandler>,
        history_handler: Arc<GetScoreHistoryHandler>,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            analyze_handler,
            history_handler,
            policy,
        }
    }
}

/// POST /api/analysis/analyze/:entryId
///
/// Returns the cached analysis when it is complete; otherwise computes one
/// (external model or heuristic) and stores it. Never fails because the
/// model is unavailable.
pub async fn analyze_entry(
    State(handlers): State<AnalysisHandlers>,
    RequireAuth(user): RequireAuth,
    Path(entry_id): Path<String>,
) -> Result<Response, ApiError> {
    let Ok(entry_id) = entry_id.parse::<EntryId>() else {
        return Err(handlers
            .policy
            .journal(JournalError::unknown_entry(), ANALYSIS_FAILED_MESSAGE));
    };

    let result = handlers
        .analyze_handler
        .handle(AnalyzeEntryCommand {
            user_id: user.id,
            entry_id,
        })
        .await
        .map_err(|e| handlers.policy.journal(e, ANALYSIS_FAILED_MESSAGE))?;

    tracing::debug!(entry_id = %result.entry_id, source = ?result.source, "Analysis served");
    Ok(ApiResponse::ok(AnalysisResponse::from(result)).into_ok())
}

/// GET /api/analysis/trends?period=30
pub async fn score_trends(
    State(handlers): State<AnalysisHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<TrendsParams>,
) -> Result<Response, ApiError> {
    let history = handlers
        .history_handler
        .handle(GetScoreHistoryQuery {
            user_id: user.id,
            period: params.period(),
        })
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while fetching trends"))?;

    Ok(ApiResponse::ok(history).into_ok())
}
