//! API configuration

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::time::Duration;

use core_kernel::geo::BoundingBox;
use domain_claims::{ConsensusPolicy, EngineConfig};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Fraction of committee weight that must vote before finalization
    pub quorum_threshold: f64,
    /// Fraction of committee weight the approve tally must exceed
    pub consensus_threshold: f64,
    /// Bounded timeout for claim store calls, in milliseconds
    pub store_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/fra_claims".to_string(),
            log_level: "info".to_string(),
            quorum_threshold: 0.6,
            consensus_threshold: 0.5,
            store_timeout_ms: 5000,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the engine policy configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            consensus: ConsensusPolicy {
                quorum_threshold: Decimal::from_f64(self.quorum_threshold)
                    .unwrap_or_else(|| dec!(0.6)),
                majority_threshold: Decimal::from_f64(self.consensus_threshold)
                    .unwrap_or_else(|| dec!(0.5)),
            },
            bounds: BoundingBox::default(),
            store_timeout: Duration::from_millis(self.store_timeout_ms),
            conflict_retries: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_from_defaults() {
        let config = ApiConfig::default();
        let engine = config.engine_config();
        assert_eq!(engine.consensus.quorum_threshold, dec!(0.6));
        assert_eq!(engine.consensus.majority_threshold, dec!(0.5));
        assert_eq!(engine.store_timeout, Duration::from_millis(5000));
    }
}
