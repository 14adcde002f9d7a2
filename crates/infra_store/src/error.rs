//! Store error types
//!
//! Adapter-internal errors with a mapping onto the shared `PortError` so
//! the service layer can classify transient conditions without knowing
//! which adapter produced them.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur inside a store adapter
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Optimistic concurrency check failed
    #[error("Version conflict: {0}")]
    VersionConflict(String),

    /// Serialization/deserialization of the claim document failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl StoreError {
    /// Creates a not found error for a specific entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Maps SQLx errors onto store error variants using the PostgreSQL
/// error-code appendix for constraint classes
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => StoreError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::Io(_) => StoreError::ConnectionFailed(error.to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => StoreError::DuplicateEntry(db_err.message().to_string()),
                        _ => StoreError::QueryFailed(db_err.message().to_string()),
                    }
                } else {
                    StoreError::QueryFailed(db_err.message().to_string())
                }
            }
            _ => StoreError::QueryFailed(error.to_string()),
        }
    }
}

impl From<StoreError> for PortError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::ConnectionFailed(message) => PortError::connection(message),
            StoreError::PoolExhausted => PortError::ServiceUnavailable {
                service: "claim_store".to_string(),
            },
            StoreError::NotFound(message) => PortError::NotFound {
                entity: "Claim".to_string(),
                id: message,
            },
            StoreError::DuplicateEntry(message) | StoreError::VersionConflict(message) => {
                PortError::conflict(message)
            }
            StoreError::QueryFailed(message) | StoreError::Serialization(message) => {
                PortError::internal(message)
            }
        }
    }
}
