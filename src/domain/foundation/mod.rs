//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, auth identity, and error types
//! that form the vocabulary of the journal domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ChatSessionId, EntryId, UserId};
pub use timestamp::Timestamp;
