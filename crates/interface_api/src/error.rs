//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use domain_claims::{ClaimError, StageValidation};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(StageValidation),

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Field-keyed validation errors, grouped for form display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, fields) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
                None,
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(validation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                format!("Validation failed with {} error(s)", validation.error_count()),
                Some(validation.errors),
            ),
            // Infrastructure detail stays out of the response body
            ApiError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "The service is temporarily unavailable. Please try again.".to_string(),
                None,
            ),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            fields,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::ClaimNotFound(msg) => ApiError::NotFound(msg),
            ClaimError::Invalid(validation) => ApiError::Validation(validation),
            ClaimError::MissingRequiredField(field) => {
                ApiError::BadRequest(format!("Missing required field: {field}"))
            }
            ClaimError::Unauthorized { .. } => ApiError::Forbidden(err.to_string()),
            ClaimError::Store(e) if e.is_transient() => ApiError::ServiceUnavailable,
            ClaimError::Store(e) => ApiError::Internal(e.to_string()),
            // Lifecycle, checklist, and consensus violations surface as a
            // single explanatory message
            other => ApiError::Conflict(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;

    #[test]
    fn test_transient_store_error_hides_detail() {
        let err: ApiError = ClaimError::Store(PortError::Timeout {
            operation: "get_claim".to_string(),
            duration_ms: 5000,
        })
        .into();
        assert!(matches!(err, ApiError::ServiceUnavailable));
    }

    #[test]
    fn test_domain_violation_maps_to_conflict() {
        let err: ApiError = ClaimError::DuplicateVote("MBR-1".to_string()).into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_unauthorized_maps_to_forbidden() {
        let err: ApiError = ClaimError::Unauthorized {
            role: "claimant".to_string(),
            action: "verify".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
