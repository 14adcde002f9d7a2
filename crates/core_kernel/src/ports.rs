//! Port infrastructure
//!
//! The engine talks to its collaborators (claim store, event sink) through
//! port traits defined in the domain crates; adapters in `infra_store`
//! implement them. Every adapter reports failures as [`PortError`] so the
//! service layer can classify transient conditions without knowing which
//! backend produced them.
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait ClaimStore: DomainPort {
//!     async fn get(&self, id: ClaimId) -> Result<Claim, PortError>;
//!     async fn update(&self, claim: &Claim, expected_version: u32) -> Result<(), PortError>;
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Failure taxonomy shared by all port implementations
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Version mismatch or duplicate key; the caller may reload and retry
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A bounded-timeout wrapper expired before the call returned
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Whether a retry with backoff could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Marker trait for port implementations; keeps every adapter `Send + Sync`
/// so stores can be shared across request handlers
pub trait DomainPort: Send + Sync + 'static {}
