//! HS256 JWT adapter for bearer token validation.
//!
//! Validates a shared-secret signed JWT and maps its claims to an
//! `AuthenticatedUser`:
//!
//! - **Subject (sub)**: required, becomes the `UserId`
//! - **Expiry (exp)**: required and must be in the future (with leeway)
//! - **Issuer (iss)**: checked only when an issuer is configured
//! - `name` / `email`: optional, used to address the user
//!
//! # Example
//!
//! ```ignore
//! let validator = JwtSessionValidator::new(JwtConfig::new(secret).with_issuer("journal"));
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT validator.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub issuer: Option<String>,
    /// Clock skew tolerated on `exp`, in seconds.
    pub leeway_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            secret,
            issuer: None,
            leeway_secs: 30,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("leeway_secs", &self.leeway_secs)
            .finish_non_exhaustive()
    }
}

/// Claims carried by journal access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Shared-secret JWT session validator.
pub struct JwtSessionValidator {
    config: JwtConfig,
    decoding_key: DecodingKey,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    /// Signs `claims` with the configured secret.
    ///
    /// Used by tests and local tooling to mint tokens this validator accepts.
    pub fn issue_token(&self, claims: &JwtClaims) -> Result<String, AuthError> {
        let key = EncodingKey::from_secret(self.config.secret.expose_secret().as_bytes());
        encode(&Header::new(Algorithm::HS256), claims, &key)
            .map_err(|e| AuthError::service_unavailable(format!("Failed to sign token: {}", e)))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_secs;
        validation.validate_exp = true;
        validation.validate_aud = false;
        match self.config.issuer {
            Some(ref issuer) => {
                validation.set_issuer(&[issuer]);
                validation.set_required_spec_claims(&["exp", "sub", "iss"]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub"]),
        }
        validation
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation()).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            },
        )?;
        let claims = data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Token carries a blank subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.name, claims.email))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    const SECRET: &str = "a-test-secret-that-is-long-enough-for-hs256";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(Secret::new(SECRET.to_string())))
    }

    fn claims(exp_offset: Duration) -> JwtClaims {
        JwtClaims {
            sub: "user-42".to_string(),
            exp: (Utc::now() + exp_offset).timestamp(),
            iss: None,
            name: Some("Robin".to_string()),
            email: Some("robin@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let v = validator();
        let token = v.issue_token(&claims(Duration::hours(1))).unwrap();

        let user = v.validate(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "user-42");
        assert_eq!(user.preferred_name(), "Robin");
        assert_eq!(user.email.as_deref(), Some("robin@example.com"));
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let v = validator();
        let token = v.issue_token(&claims(Duration::hours(-2))).unwrap();

        assert_eq!(v.validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn rejects_token_signed_with_other_secret() {
        let other = JwtSessionValidator::new(JwtConfig::new(Secret::new(
            "a-completely-different-secret-value-here".to_string(),
        )));
        let token = other.issue_token(&claims(Duration::hours(1))).unwrap();

        assert_eq!(validator().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn rejects_garbage() {
        assert_eq!(
            validator().validate("not.a.jwt").await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn enforces_configured_issuer() {
        let v = JwtSessionValidator::new(
            JwtConfig::new(Secret::new(SECRET.to_string())).with_issuer("wellness-journal"),
        );

        let missing = v.issue_token(&claims(Duration::hours(1))).unwrap();
        assert_eq!(v.validate(&missing).await, Err(AuthError::InvalidToken));

        let wrong = v
            .issue_token(&JwtClaims {
                iss: Some("someone-else".to_string()),
                ..claims(Duration::hours(1))
            })
            .unwrap();
        assert_eq!(v.validate(&wrong).await, Err(AuthError::InvalidToken));

        let right = v
            .issue_token(&JwtClaims {
                iss: Some("wellness-journal".to_string()),
                ..claims(Duration::hours(1))
            })
            .unwrap();
        assert!(v.validate(&right).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_blank_subject() {
        let v = validator();
        let token = v
            .issue_token(&JwtClaims {
                sub: "  ".to_string(),
                ..claims(Duration::hours(1))
            })
            .unwrap();

        assert_eq!(v.validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", validator());
        assert!(!rendered.contains(SECRET));
    }
}
