//! HTTP adapter for companion chat sessions.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatSessionResponse, ChatSessionSummary, CreateChatSessionRequest, SendMessageRequest,
    SendMessageResponse, SessionContext,
};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
