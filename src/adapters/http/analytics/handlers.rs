//! HTTP handlers for analytics endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Response,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiResponse, ErrorPolicy};
use crate::application::handlers::analytics::{
    GetInsightsHandler, GetInsightsQuery, GetOverviewHandler, GetOverviewQuery, GetTrendsHandler,
    GetTrendsQuery,
};

use super::dto::{InsightsResponse, TrendsParams};

#[derive(Clone)]
pub struct AnalyticsHandlers {
    overview_handler: Arc<GetOverviewHandler>,
    trends_handler: Arc<GetTrendsHandler>,
    insights_handler: Arc<GetInsightsHandler>,
    policy: ErrorPolicy,
}

impl AnalyticsHandlers {
    pub fn new(
        overview_handler: Arc<GetOverviewHandler>,
        trends_handler: Arc<GetTrendsHandler>,
        insights_handler: Arc<GetInsightsHandler>,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            overview_handler,
            trends_handler,
            insights_handler,
            policy,
        }
    }
}

/// GET /api/analytics/overview
pub async fn overview(
    State(handlers): State<AnalyticsHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    let overview = handlers
        .overview_handler
        .handle(GetOverviewQuery { user_id: user.id })
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while fetching overview"))?;

    Ok(ApiResponse::ok(overview).into_ok())
}

/// GET /api/analytics/trends?period=30
pub async fn trends(
    State(handlers): State<AnalyticsHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<TrendsParams>,
) -> Result<Response, ApiError> {
    let trends = handlers
        .trends_handler
        .handle(GetTrendsQuery {
            user_id: user.id,
            period: params.period(),
        })
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while fetching trends"))?;

    Ok(ApiResponse::ok(trends).into_ok())
}

/// GET /api/analytics/insights
pub async fn insights(
    State(handlers): State<AnalyticsHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    let insights = handlers
        .insights_handler
        .handle(GetInsightsQuery { user_id: user.id })
        .await
        .map_err(|e| handlers.policy.journal(e, "Server error while generating insights"))?;

    Ok(ApiResponse::ok(InsightsResponse::from(insights)).into_ok())
}
