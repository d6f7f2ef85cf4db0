//! Companion chat command and query handlers.

mod create_chat_session;
mod delete_chat_session;
mod get_chat_session;
mod list_chat_sessions;
mod send_message;

pub use create_chat_session::{CreateChatSessionCommand, CreateChatSessionHandler};
pub use delete_chat_session::{DeleteChatSessionCommand, DeleteChatSessionHandler};
pub use get_chat_session::{GetChatSessionHandler, GetChatSessionQuery};
pub use list_chat_sessions::{ListChatSessionsHandler, ListChatSessionsQuery};
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult, COMPANION_TIMEOUT};
