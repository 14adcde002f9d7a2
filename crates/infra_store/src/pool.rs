//! PostgreSQL connection pooling
//!
//! Pool settings live in [`DatabaseConfig`]; the acquire timeout doubles as
//! the bound on how long a request waits for a connection, so a saturated
//! pool surfaces as `PoolExhausted` instead of a hang.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::error::StoreError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Pool settings for the claim store database
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Bound on waiting for a free connection
    pub acquire_timeout: Duration,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60),
            idle_timeout: Duration::from_secs(10 * 60),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Opens the pool described by this configuration
    ///
    /// # Errors
    ///
    /// `StoreError::ConnectionFailed` when the database is unreachable.
    pub async fn connect(self) -> Result<DatabasePool, StoreError> {
        tracing::info!(
            max_connections = self.max_connections,
            min_connections = self.min_connections,
            "opening claim store pool"
        );

        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .max_lifetime(self.max_lifetime)
            .idle_timeout(self.idle_timeout)
            .connect(&self.url)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("postgres://localhost/fra_claims")
    }
}

/// Opens a pool from a connection string with default settings
pub async fn create_pool_from_url(url: &str) -> Result<DatabasePool, StoreError> {
    DatabaseConfig::new(url).connect().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_overrides_defaults() {
        let config = DatabaseConfig::new("postgres://test")
            .max_connections(50)
            .min_connections(10)
            .acquire_timeout(Duration::from_secs(5));

        assert_eq!(config.url, "postgres://test");
        assert_eq!(config.max_connections, 50);
        assert_eq!(config.min_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_defaults_keep_a_warm_floor() {
        let config = DatabaseConfig::default();
        assert!(config.min_connections >= 1);
        assert!(config.max_connections > config.min_connections);
    }
}
