//! Error handling utilities for API responses.
//!
//! Provides structured error responses and conversion between service-layer
//! errors and HTTP responses.
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `error`: Human-readable message
//! - `error_type`: Machine-readable error category
//! - `details`: Optional field-specific validation errors
//!
//! # Error Handling Flow
//! 1. Service layer returns domain-specific `ServiceError`
//! 2. `service_error_to_http` converts to appropriate HTTP response
//! 3. Infrastructure error detail goes to the log, never the response body

use crate::errors::ServiceError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Request timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-specific validation error details
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format.
///
/// The authentication variants map to fixed, cause-independent bodies; the
/// infrastructure variants log their detail and return a generic body.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, error_type, message) = match error {
        ServiceError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid credentials".to_string(),
        ),
        ServiceError::TokenInvalidOrExpired => (
            StatusCode::UNAUTHORIZED,
            "token_invalid_or_expired",
            "token invalid or expired".to_string(),
        ),
        ServiceError::Validation { message } => {
            (StatusCode::BAD_REQUEST, "validation_error", message)
        }
        ServiceError::Configuration { message } => {
            tracing::error!("Configuration error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                "Internal server error".to_string(),
            )
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                "Service temporarily unavailable".to_string(),
            )
        }
        ServiceError::ExternalService { message } => {
            tracing::error!("External service error: {}", message);
            (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                "Upstream service failure".to_string(),
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    };

    let error_response = ApiResponse::<()>::error(message, error_type, None);
    (status, serde_json::to_string(&error_response).unwrap())
}

/// Formats validator::ValidationErrors into field-specific error details
pub fn validation_errors_to_field_errors(errors: validator::ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .unwrap_or(&"Invalid value".into())
                    .to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_validation_errors_flatten_to_fields() {
        #[derive(Validate)]
        struct Payload {
            #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
            password: String,
        }

        let payload = Payload {
            password: "short".to_string(),
        };
        let field_errors = validation_errors_to_field_errors(payload.validate().unwrap_err());

        assert_eq!(field_errors.len(), 1);
        assert_eq!(field_errors[0].field, "password");
        assert_eq!(
            field_errors[0].message,
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_auth_errors_map_to_fixed_bodies() {
        let (status, body) = service_error_to_http(ServiceError::InvalidCredentials);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("invalid credentials"));

        let (status, body) = service_error_to_http(ServiceError::TokenInvalidOrExpired);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("token invalid or expired"));
    }

    #[test]
    fn test_infrastructure_detail_not_leaked() {
        let (status, body) = service_error_to_http(ServiceError::Database {
            source: anyhow::anyhow!("connection refused to db host 10.0.0.5"),
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.contains("10.0.0.5"));
        assert!(body.contains("store_unavailable"));
    }
}
