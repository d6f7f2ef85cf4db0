//! HTTP handlers for companion chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiError, ApiJson, ApiResponse, ErrorPolicy, MessageResponse};
use crate::application::handlers::chat::{
    CreateChatSessionCommand, CreateChatSessionHandler, DeleteChatSessionCommand,
    DeleteChatSessionHandler, GetChatSessionHandler, GetChatSessionQuery, ListChatSessionsHandler,
    ListChatSessionsQuery, SendMessageCommand, SendMessageHandler,
};
use crate::domain::chat::ChatError;
use crate::domain::foundation::ChatSessionId;

use super::dto::{
    ChatSessionResponse, ChatSessionSummary, CreateChatSessionRequest, SendMessageRequest,
    SendMessageResponse,
};

#[derive(Clone)]
pub struct ChatHandlers {
    create_handler: Arc<CreateChatSessionHandler>,
    list_handler: Arc<ListChatSessionsHandler>,
    get_handler: Arc<GetChatSessionHandler>,
    send_handler: Arc<SendMessageHandler>,
    delete_handler: Arc<DeleteChatSessionHandler>,
    policy: ErrorPolicy,
}

impl ChatHandlers {
    pub fn new(
        create_handler: Arc<CreateChatSessionHandler>,
        list_handler: Arc<ListChatSessionsHandler>,
        get_handler: Arc<GetChatSessionHandler>,
        send_handler: Arc<SendMessageHandler>,
        delete_handler: Arc<DeleteChatSessionHandler>,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            create_handler,
            list_handler,
            get_handler,
            send_handler,
            delete_handler,
            policy,
        }
    }
}

fn parse_session_id(raw: &str, policy: ErrorPolicy) -> Result<ChatSessionId, ApiError> {
    raw.parse::<ChatSessionId>()
        .map_err(|_| policy.chat(ChatError::unknown_session(), ""))
}

/// POST /api/chat/sessions
///
/// The body is optional; an empty request creates a general support session.
pub async fn create_session(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    body: Option<ApiJson<CreateChatSessionRequest>>,
) -> Result<Response, ApiError> {
    let req = body.map(|ApiJson(req)| req).unwrap_or_default();
    let session_type = req.session_type()?;

    let session = handlers
        .create_handler
        .handle(CreateChatSessionCommand {
            user_id: user.id,
            title: req.title,
            session_type,
        })
        .await
        .map_err(|e| handlers.policy.chat(e, "Server error while creating chat session"))?;

    Ok(ApiResponse::ok(ChatSessionResponse::from(&session)).into_created())
}

/// GET /api/chat/sessions
pub async fn list_sessions(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    let sessions = handlers
        .list_handler
        .handle(ListChatSessionsQuery { user_id: user.id })
        .await
        .map_err(|e| handlers.policy.chat(e, "Server error while fetching chat sessions"))?;

    let summaries: Vec<ChatSessionSummary> = sessions.iter().map(Into::into).collect();
    Ok(ApiResponse::ok(summaries).into_ok())
}

/// GET /api/chat/sessions/:id
pub async fn get_session(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session_id = parse_session_id(&id, handlers.policy)?;

    let session = handlers
        .get_handler
        .handle(GetChatSessionQuery {
            user_id: user.id,
            session_id,
        })
        .await
        .map_err(|e| handlers.policy.chat(e, "Server error while fetching chat session"))?;

    Ok(ApiResponse::ok(ChatSessionResponse::from(&session)).into_ok())
}

/// POST /api/chat/sessions/:id/messages
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> Result<Response, ApiError> {
    let session_id = parse_session_id(&id, handlers.policy)?;

    let result = handlers
        .send_handler
        .handle(SendMessageCommand {
            user,
            session_id,
            content: req.content.unwrap_or_default(),
        })
        .await
        .map_err(|e| handlers.policy.chat(e, "Server error while sending message"))?;

    Ok(ApiResponse::ok(SendMessageResponse::from(result)).into_ok())
}

/// DELETE /api/chat/sessions/:id
pub async fn delete_session(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session_id = parse_session_id(&id, handlers.policy)?;

    handlers
        .delete_handler
        .handle(DeleteChatSessionCommand {
            user_id: user.id,
            session_id,
        })
        .await
        .map_err(|e| handlers.policy.chat(e, "Server error while deleting chat session"))?;

    Ok(MessageResponse::ok("Chat session deleted successfully"))
}
