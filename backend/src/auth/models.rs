//! Data structures for authentication-related requests and responses.
//!
//! Every payload coming off the wire is validated here before it reaches the
//! service layer, so the core only ever sees well-formed primitive values.

use crate::database::models::{User, UserRole};
use crate::utils::secret::TOKEN_BYTES;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    // Normalization happens in the service; only presence is checked here.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response containing the session token and user info
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
    pub expires_in: u64, // Token expiration in seconds
}

/// User information returned to clients. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub email_verified: bool,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            email_verified: user.email_verified,
        }
    }
}

/// Request to have a verification or reset email sent.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

/// Confirmation payload carrying the raw token from an email link.
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmVerificationRequest {
    #[validate(length(equal = 64, message = "Token must be 64 characters"))]
    pub token: String,
}

/// Confirmation payload for a password reset.
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmResetRequest {
    #[validate(length(equal = 64, message = "Token must be 64 characters"))]
    pub token: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

// 64 hex chars == TOKEN_BYTES of entropy; keep the validator in sync.
const _: () = assert!(TOKEN_BYTES * 2 == 64);
