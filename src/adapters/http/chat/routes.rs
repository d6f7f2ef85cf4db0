//! HTTP routes for companion chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, delete_session, get_session, list_sessions, send_message, ChatHandlers,
};

/// Creates the chat router, mounted at `/api/chat`.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/sessions", post(create_session).get(list_sessions))
        .route("/sessions/:id", get(get_session).delete(delete_session))
        .route("/sessions/:id/messages", post(send_message))
        .with_state(handlers)
}
