//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what the bearer-token collaborator hands to every
//! core operation. Handlers receive it explicitly; nothing reads identity
//! from ambient request state.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier (token subject).
    pub id: UserId,

    /// Display name if the token carries one.
    pub display_name: Option<String>,

    /// Email address if the token carries one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, display_name: Option<String>, email: Option<String>) -> Self {
        Self {
            id,
            display_name,
            email,
        }
    }

    /// Name used when addressing the user in companion prompts.
    ///
    /// Falls back to the email, then to a neutral "friend".
    pub fn preferred_name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("friend")
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The validator could not be used (bad key material, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn preferred_name_uses_display_name_first() {
        let user = AuthenticatedUser::new(
            user_id(),
            Some("Alice".to_string()),
            Some("alice@example.com".to_string()),
        );
        assert_eq!(user.preferred_name(), "Alice");
    }

    #[test]
    fn preferred_name_falls_back_to_email_then_friend() {
        let with_email = AuthenticatedUser::new(user_id(), None, Some("bob@example.com".to_string()));
        assert_eq!(with_email.preferred_name(), "bob@example.com");

        let bare = AuthenticatedUser::new(user_id(), None, None);
        assert_eq!(bare.preferred_name(), "friend");
    }

    #[test]
    fn auth_error_displays_correctly() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(
            AuthError::service_unavailable("bad key").to_string(),
            "Auth service unavailable: bad key"
        );
    }
}
