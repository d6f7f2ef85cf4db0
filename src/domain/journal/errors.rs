//! Journal-specific error types.

use crate::domain::foundation::{DomainError, EntryId, ErrorCode, ValidationError};

/// Journal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalError {
    /// Entry does not exist or belongs to another user.
    NotFound(Option<EntryId>),
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// Persistence error.
    Infrastructure(String),
}

impl JournalError {
    pub fn not_found(id: EntryId) -> Self {
        JournalError::NotFound(Some(id))
    }

    /// Not found for an id that could not even be parsed.
    pub fn unknown_entry() -> Self {
        JournalError::NotFound(None)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        JournalError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        JournalError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            JournalError::NotFound(_) => ErrorCode::EntryNotFound,
            JournalError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            JournalError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            JournalError::NotFound(_) => "Journal entry not found".to_string(),
            JournalError::ValidationFailed { message, .. } => message.clone(),
            JournalError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for JournalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for JournalError {}

impl From<ValidationError> for JournalError {
    fn from(err: ValidationError) -> Self {
        JournalError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for JournalError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EntryNotFound => JournalError::NotFound(None),
            ErrorCode::ValidationFailed => JournalError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => JournalError::Infrastructure(err.to_string()),
        }
    }
}
