//! Password hashing and verification.
//!
//! bcrypt salts each hash and compares internally, so equality never goes
//! through a naive string comparison. Plaintext passwords and stored hashes
//! are never logged.

use crate::errors::{ServiceError, ServiceResult};

/// Hashes a plaintext password with the configured cost factor.
pub fn hash_password(password: &str, cost: u32) -> ServiceResult<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {e}")))
}

/// Verifies a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, stored_hash: &str) -> ServiceResult<bool> {
    bcrypt::verify(password, stored_hash)
        .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {e}")))
}
