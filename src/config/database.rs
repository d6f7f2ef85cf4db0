//! Storage configuration
//!
//! One URL selects the backend: a PostgreSQL connection string, or
//! `memory://` for a process-local store that forgets everything on restart.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

pub const IN_MEMORY_URL: &str = "memory://";

/// Upper bound on pooled connections.
pub const MAX_POOL_SIZE: u32 = 50;

/// Backend selected by the storage URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://...` or `memory://`
    pub url: String,

    /// Connections kept for journal and chat queries
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Seconds a request may wait for a free connection
    #[serde(default = "default_connect_wait")]
    pub connect_wait_secs: u64,

    /// Apply the bundled `migrations/` before serving
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Backend named by the URL scheme.
    pub fn backend(&self) -> Result<StorageBackend, ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if url.starts_with(IN_MEMORY_URL) {
            return Ok(StorageBackend::InMemory);
        }
        match url.split_once("://") {
            Some(("postgres" | "postgresql", rest)) if !rest.is_empty() => {
                Ok(StorageBackend::Postgres)
            }
            _ => Err(ValidationError::InvalidDatabaseUrl),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self.backend(), Ok(StorageBackend::InMemory))
    }

    pub fn connect_wait(&self) -> Duration {
        Duration::from_secs(self.connect_wait_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend()? == StorageBackend::Postgres
            && !(1..=MAX_POOL_SIZE).contains(&self.pool_size)
        {
            return Err(ValidationError::InvalidPoolSize(MAX_POOL_SIZE));
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_size: default_pool_size(),
            connect_wait_secs: default_connect_wait(),
            run_migrations: default_run_migrations(),
        }
    }
}

fn default_pool_size() -> u32 {
    10
}

fn default_connect_wait() -> u64 {
    5
}

fn default_run_migrations() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn backend_follows_url_scheme() {
        assert_eq!(with_url("memory://").backend(), Ok(StorageBackend::InMemory));
        assert_eq!(
            with_url("postgres://journal@localhost/journal").backend(),
            Ok(StorageBackend::Postgres)
        );
        assert_eq!(
            with_url("postgresql://localhost/journal").backend(),
            Ok(StorageBackend::Postgres)
        );
        assert_eq!(
            with_url("mysql://localhost/journal").backend(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
        assert_eq!(
            with_url("postgres://").backend(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
        assert_eq!(
            with_url("  ").backend(),
            Err(ValidationError::MissingRequired("DATABASE_URL"))
        );
    }

    #[test]
    fn defaults_migrate_with_a_small_pool() {
        let config = DatabaseConfig::default();
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.connect_wait(), Duration::from_secs(5));
        assert!(config.run_migrations);
    }

    #[test]
    fn pool_size_is_bounded_for_postgres_only() {
        let mut config = with_url("postgres://localhost/journal");
        config.pool_size = 0;
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidPoolSize(MAX_POOL_SIZE))
        );
        config.pool_size = MAX_POOL_SIZE + 1;
        assert!(config.validate().is_err());
        config.pool_size = MAX_POOL_SIZE;
        assert!(config.validate().is_ok());

        let memory = DatabaseConfig {
            pool_size: 0,
            ..with_url("memory://")
        };
        assert!(memory.is_in_memory());
        assert!(memory.validate().is_ok());
    }
}
