//! Assembles the `/api` router from ports.
//!
//! Every application handler is built here from the injected ports, so
//! `main` and the integration tests share one wiring path.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::{
    AnalyzeEntryHandler, CreateChatSessionHandler, CreateEntryHandler, DeleteChatSessionHandler,
    DeleteEntryHandler, GetChatSessionHandler, GetEntryHandler, GetInsightsHandler,
    GetJournalStatsHandler, GetOverviewHandler, GetScoreHistoryHandler, GetTrendsHandler,
    ListChatSessionsHandler, ListEntriesHandler, SendMessageHandler, UpdateEntryHandler,
};
use crate::ports::{
    ChatCompanion, ChatSessionRepository, EntryAnalyzer, JournalRepository, SessionValidator,
};

use super::analysis::{analysis_routes, AnalysisHandlers};
use super::analytics::{analytics_routes, AnalyticsHandlers};
use super::chat::{chat_routes, ChatHandlers};
use super::health::health;
use super::journal::{journal_routes, JournalHandlers};
use super::middleware::auth_middleware;
use super::response::{ApiError, ErrorPolicy};

/// Ports the API is built from.
#[derive(Clone)]
pub struct ApiDependencies {
    pub journal_repository: Arc<dyn JournalRepository>,
    pub chat_repository: Arc<dyn ChatSessionRepository>,
    pub session_validator: Arc<dyn SessionValidator>,
    /// `None` disables the external model; analyses use the heuristic.
    pub entry_analyzer: Option<Arc<dyn EntryAnalyzer>>,
    /// `None` disables the external model; replies use canned fallbacks.
    pub chat_companion: Option<Arc<dyn ChatCompanion>>,
}

/// Slack between a model call's timeout and the whole request's, so a
/// timed-out call still has time to fall back and answer.
pub const FALLBACK_HEADROOM: Duration = Duration::from_secs(5);

/// Shortest request timeout that lets every model call fall back in time.
pub fn min_request_timeout(model_timeout: Duration) -> Duration {
    model_timeout + FALLBACK_HEADROOM
}

/// Transport-level settings for the router.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Empty allows any origin.
    pub cors_origins: Vec<String>,
    pub error_policy: ErrorPolicy,
    /// Upper bound on each external model call.
    pub model_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            cors_origins: Vec::new(),
            error_policy: ErrorPolicy::default(),
            model_timeout: crate::application::handlers::ANALYSIS_TIMEOUT,
        }
    }
}

/// Builds the full application router.
pub fn api_router(deps: ApiDependencies, settings: &HttpSettings) -> Router {
    let policy = settings.error_policy;
    let floor = min_request_timeout(settings.model_timeout);
    let request_timeout = if settings.request_timeout < floor {
        tracing::warn!(
            requested_ms = settings.request_timeout.as_millis() as u64,
            applied_ms = floor.as_millis() as u64,
            "Request timeout raised above the model timeout"
        );
        floor
    } else {
        settings.request_timeout
    };

    let journal_repo = deps.journal_repository;
    let chat_repo = deps.chat_repository;

    let journal = JournalHandlers::new(
        Arc::new(CreateEntryHandler::new(journal_repo.clone())),
        Arc::new(ListEntriesHandler::new(journal_repo.clone())),
        Arc::new(GetEntryHandler::new(journal_repo.clone())),
        Arc::new(UpdateEntryHandler::new(journal_repo.clone())),
        Arc::new(DeleteEntryHandler::new(journal_repo.clone())),
        Arc::new(GetJournalStatsHandler::new(journal_repo.clone())),
        policy,
    );

    let analysis = AnalysisHandlers::new(
        Arc::new(
            AnalyzeEntryHandler::new(journal_repo.clone(), deps.entry_analyzer)
                .with_timeout(settings.model_timeout),
        ),
        Arc::new(GetScoreHistoryHandler::new(journal_repo.clone())),
        policy,
    );

    let chat = ChatHandlers::new(
        Arc::new(CreateChatSessionHandler::new(chat_repo.clone())),
        Arc::new(ListChatSessionsHandler::new(chat_repo.clone())),
        Arc::new(GetChatSessionHandler::new(chat_repo.clone())),
        Arc::new(
            SendMessageHandler::new(chat_repo.clone(), deps.chat_companion)
                .with_timeout(settings.model_timeout),
        ),
        Arc::new(DeleteChatSessionHandler::new(chat_repo)),
        policy,
    );

    let analytics = AnalyticsHandlers::new(
        Arc::new(GetOverviewHandler::new(journal_repo.clone())),
        Arc::new(GetTrendsHandler::new(journal_repo.clone())),
        Arc::new(GetInsightsHandler::new(journal_repo)),
        policy,
    );

    let authenticated = Router::new()
        .nest("/api/journal", journal_routes(journal))
        .nest("/api/analysis", analysis_routes(analysis))
        .nest("/api/chat", chat_routes(chat))
        .nest("/api/analytics", analytics_routes(analytics))
        .layer(middleware::from_fn_with_state(
            deps.session_validator,
            auth_middleware,
        ));

    authenticated
        .route("/api/health", get(health))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.cors_origins))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_envelope))
}

async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Route not found")
}

/// `TimeoutLayer` answers with a bare 408; give it the usual error body.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        ApiError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
    } else {
        response
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_leave_headroom_over_model_timeout() {
        let settings = HttpSettings::default();
        assert!(settings.request_timeout > settings.model_timeout);
        assert!(settings.request_timeout >= min_request_timeout(settings.model_timeout));
        assert!(!settings.error_policy.exposes_internal());
    }

    #[tokio::test]
    async fn timeouts_get_the_error_envelope() {
        let response = timeout_envelope(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Request timed out");

        let ok = timeout_envelope(StatusCode::OK.into_response()).await;
        assert_eq!(ok.status(), StatusCode::OK);
    }
}
