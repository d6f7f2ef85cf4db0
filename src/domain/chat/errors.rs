//! Chat-specific error types.

use crate::domain::foundation::{ChatSessionId, DomainError, ErrorCode, ValidationError};

/// Chat-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Session does not exist or belongs to another user.
    NotFound(Option<ChatSessionId>),
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// Persistence error.
    Infrastructure(String),
}

impl ChatError {
    pub fn not_found(id: ChatSessionId) -> Self {
        ChatError::NotFound(Some(id))
    }

    pub fn unknown_session() -> Self {
        ChatError::NotFound(None)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ChatError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ChatError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::NotFound(_) => ErrorCode::ChatSessionNotFound,
            ChatError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ChatError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ChatError::NotFound(_) => "Chat session not found".to_string(),
            ChatError::ValidationFailed { message, .. } => message.clone(),
            ChatError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ChatError {}

impl From<ValidationError> for ChatError {
    fn from(err: ValidationError) -> Self {
        ChatError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ChatSessionNotFound => ChatError::NotFound(None),
            _ => ChatError::Infrastructure(err.to_string()),
        }
    }
}
