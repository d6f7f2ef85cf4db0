//! Bearer token validation port.
//!
//! HTTP middleware hands the raw token to a `SessionValidator` and receives
//! the authenticated user, which is then passed explicitly into every
//! handler command.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature and expiry
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` when validation cannot run at all
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a raw token (without the `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
