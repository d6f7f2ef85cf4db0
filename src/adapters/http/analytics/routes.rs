//! HTTP routes for analytics endpoints.

use axum::{routing::get, Router};

use super::handlers::{insights, overview, trends, AnalyticsHandlers};

/// Creates the analytics router, mounted at `/api/analytics`.
pub fn analytics_routes(handlers: AnalyticsHandlers) -> Router {
    Router::new()
        .route("/overview", get(overview))
        .route("/trends", get(trends))
        .route("/insights", get(insights))
        .with_state(handlers)
}
