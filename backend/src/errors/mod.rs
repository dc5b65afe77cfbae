//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.

use thiserror::Error;

/// Generic service error that can be used across all entities.
///
/// The two authentication variants deliberately carry no detail: the caller
/// must not be able to tell an unknown account from a wrong password, or an
/// expired token from one that never existed.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad email/password combination. Always the same message regardless
    /// of which check failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bad, expired, or already-consumed token. Always the same message.
    #[error("token invalid or expired")]
    TokenInvalidOrExpired,

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Missing or malformed process-wide configuration. Fatal at startup.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Transient store failure, surfaced to the caller as retryable.
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("External service error: {message}")]
    ExternalService { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn external_service(message: impl Into<String>) -> Self {
        Self::ExternalService {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
