//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Request timeout must be between 1 and {0} seconds")]
    InvalidTimeout(u64),

    #[error("Request timeout must be at least {0} seconds so model calls can fall back in time")]
    RequestTimeoutTooShort(u64),

    #[error("Database URL must start with postgres://, postgresql:// or memory://")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and {0}")]
    InvalidPoolSize(u32),

    #[error("JWT secret must be at least {0} bytes in production")]
    JwtSecretTooShort(usize),

    #[error("AI base URL must be an http(s) URL")]
    InvalidAiBaseUrl,

    #[error("In-memory storage is not allowed in production")]
    InMemoryInProduction,
}
