//! Chat module - companion sessions, messages and canned fallback replies.

mod aggregate;
mod errors;
pub mod fallback;
mod message;
mod session_type;

pub use aggregate::{ChatSession, DEFAULT_SESSION_TITLE, GREETING, MAX_SESSION_TITLE_LENGTH};
pub use errors::ChatError;
pub use fallback::{fallback_reply, fallback_reply_with, replies_for};
pub use message::{ChatMessage, ChatRole, MAX_MESSAGE_LENGTH};
pub use session_type::SessionType;
