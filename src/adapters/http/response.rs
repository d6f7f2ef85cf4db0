//! Response envelope shared by every endpoint.
//!
//! Success bodies are `{ "success": true, "data": ... }` (or `message` for
//! deletions). Failures are `{ "success": false, "message": ... }` with an
//! optional `error` field carrying internal detail, which is only present
//! when the [`ErrorPolicy`] allows it.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::chat::ChatError;
use crate::domain::journal::JournalError;

// ════════════════════════════════════════════════════════════════════════════
// Success bodies
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    /// 200 with the envelope.
    pub fn into_ok(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }

    /// 201 with the envelope.
    pub fn into_created(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// `{ "success": true, "message": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Response {
        (
            StatusCode::OK,
            Json(Self {
                success: true,
                message: message.into(),
            }),
        )
            .into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Whether 500 responses may carry internal error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorPolicy {
    expose_internal: bool,
}

impl ErrorPolicy {
    /// Detail is included (non-production).
    pub fn verbose() -> Self {
        Self {
            expose_internal: true,
        }
    }

    /// Detail is withheld (production).
    pub fn opaque() -> Self {
        Self {
            expose_internal: false,
        }
    }

    pub fn exposes_internal(&self) -> bool {
        self.expose_internal
    }

    /// Maps a journal error. `context` is the generic 500 message.
    pub fn journal(&self, error: JournalError, context: &str) -> ApiError {
        match error {
            JournalError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, error.message()),
            JournalError::ValidationFailed { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, error.message())
            }
            JournalError::Infrastructure(detail) => self.internal(context, detail),
        }
    }

    /// Maps a chat error. `context` is the generic 500 message.
    pub fn chat(&self, error: ChatError, context: &str) -> ApiError {
        match error {
            ChatError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, error.message()),
            ChatError::ValidationFailed { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, error.message())
            }
            ChatError::Infrastructure(detail) => self.internal(context, detail),
        }
    }

    fn internal(&self, context: &str, detail: String) -> ApiError {
        tracing::error!(error = %detail, "{}", context);
        let error = ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, context);
        if self.expose_internal {
            error.with_detail(detail)
        } else {
            error
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// An error response ready to be rendered.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.message,
            error: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// JSON body extractor
// ════════════════════════════════════════════════════════════════════════════

/// `Json<T>` whose rejection uses the error envelope instead of plain text.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::new(rejection.status(), "Invalid request body").with_detail(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EntryId;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_uses_domain_message() {
        let response = ErrorPolicy::opaque()
            .journal(JournalError::not_found(EntryId::new()), "unused")
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Journal entry not found");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn production_hides_internal_detail() {
        let response = ErrorPolicy::opaque()
            .chat(
                ChatError::infrastructure("connection refused"),
                "Server error while sending message",
            )
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Server error while sending message");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn development_exposes_internal_detail() {
        let response = ErrorPolicy::verbose()
            .journal(
                JournalError::infrastructure("connection refused"),
                "Server error during analysis",
            )
            .into_response();

        let json = body_json(response).await;
        assert_eq!(json["message"], "Server error during analysis");
        assert_eq!(json["error"], "connection refused");
    }

    #[test]
    fn validation_maps_to_400() {
        let error = ErrorPolicy::default().chat(
            ChatError::validation("content", "Message content is required"),
            "unused",
        );
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Message content is required");
    }

    #[tokio::test]
    async fn success_envelope() {
        let response = ApiResponse::ok(serde_json::json!({ "a": 1 })).into_created();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["a"], 1);
    }
}
