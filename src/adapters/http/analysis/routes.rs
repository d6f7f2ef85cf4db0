//! HTTP routes for analysis endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{analyze_entry, score_trends, AnalysisHandlers};

/// Creates the analysis router, mounted at `/api/analysis`.
pub fn analysis_routes(handlers: AnalysisHandlers) -> Router {
    Router::new()
        .route("/analyze/:entry_id", post(analyze_entry))
        .route("/trends", get(score_trends))
        .with_state(handlers)
}
