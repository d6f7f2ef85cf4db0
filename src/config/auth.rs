//! Authentication configuration (HS256 bearer tokens)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest JWT secret accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify tokens
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim; unset skips the check
    #[serde(default)]
    pub jwt_issuer: Option<String>,

    /// Clock skew tolerance for `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Secret::new(jwt_secret.into()),
            jwt_issuer: None,
            leeway_secs: default_leeway(),
        }
    }

    /// Validate authentication configuration
    ///
    /// Any non-empty secret is accepted outside production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("secret");
        assert_eq!(config.leeway_secs, 30);
        assert!(config.jwt_issuer.is_none());
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::new("   ");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_validation_production_requires_long_secret() {
        let config = AuthConfig::new("short-dev-secret");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort(32))
        );

        let config = AuthConfig::new("x".repeat(32));
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new("super-secret-value");
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }
}
