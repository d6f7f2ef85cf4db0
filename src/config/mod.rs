//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `WELLNESS_JOURNAL`
//! prefix and `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use wellness_journal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::{DatabaseConfig, StorageBackend, IN_MEMORY_URL, MAX_POOL_SIZE};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig, MAX_REQUEST_TIMEOUT_SECS};

use serde::Deserialize;

use crate::adapters::http::min_request_timeout;
use crate::application::handlers::ANALYSIS_TIMEOUT;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "WELLNESS_JOURNAL";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bind address, environment, logging, HTTP limits
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection or `memory://`
    pub database: DatabaseConfig,

    /// Bearer token verification
    pub auth: AuthConfig,

    /// External model endpoint
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads variables with the `WELLNESS_JOURNAL` prefix
    /// 3. Splits nesting on `__`
    ///
    /// # Environment Variable Format
    ///
    /// - `WELLNESS_JOURNAL__SERVER__PORT=5000` -> `server.port = 5000`
    /// - `WELLNESS_JOURNAL__DATABASE__URL=...` -> `database.url = ...`
    /// - `WELLNESS_JOURNAL__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation run once at startup.
    ///
    /// The request timeout must outlast a timed-out model call plus the
    /// fallback, otherwise the transport cuts the request off first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        let floor = min_request_timeout(ANALYSIS_TIMEOUT);
        if self.server.request_timeout() < floor {
            return Err(ValidationError::RequestTimeoutTooShort(floor.as_secs()));
        }
        self.database.validate()?;
        if self.is_production() && self.database.is_in_memory() {
            return Err(ValidationError::InMemoryInProduction);
        }
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
