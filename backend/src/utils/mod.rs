//! Shared utilities for the backend.

pub mod jwt;
pub mod password;
pub mod secret;
pub mod token_hash;

/// Canonical form of an email address used for lookups and token subjects.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
