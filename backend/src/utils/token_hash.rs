//! One-way hashing of raw tokens for storage and lookup.
//!
//! Only the hash of a token is ever persisted. The digest mixes in a
//! server-wide secret so a leaked table of hashes cannot be matched against
//! guessed tokens offline.

use crate::errors::{ServiceError, ServiceResult};
use sha2::{Digest, Sha256};

/// Hashes raw tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenHasher {
    secret: String,
}

impl TokenHasher {
    /// Creates a hasher from the configured secret. An empty secret is a
    /// configuration error, not a runtime fallback.
    pub fn new(secret: &str) -> ServiceResult<Self> {
        if secret.trim().is_empty() {
            return Err(ServiceError::configuration(
                "token hash secret must not be empty",
            ));
        }

        Ok(Self {
            secret: secret.to_string(),
        })
    }

    /// Computes the storable digest of a raw token. Deterministic, so the
    /// same presented token always maps to the same lookup key.
    pub fn hash(&self, raw_token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(raw_token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = TokenHasher::new("server-secret").unwrap();
        assert_eq!(hasher.hash("abc123"), hasher.hash("abc123"));
    }

    #[test]
    fn test_hash_differs_by_token_and_secret() {
        let hasher = TokenHasher::new("server-secret").unwrap();
        let other = TokenHasher::new("another-secret").unwrap();

        assert_ne!(hasher.hash("abc123"), hasher.hash("abc124"));
        assert_ne!(hasher.hash("abc123"), other.hash("abc123"));
    }

    #[test]
    fn test_hash_never_echoes_input() {
        let hasher = TokenHasher::new("server-secret").unwrap();
        let digest = hasher.hash("abc123");
        assert_eq!(digest.len(), 64);
        assert!(!digest.contains("abc123"));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            TokenHasher::new("  "),
            Err(ServiceError::Configuration { .. })
        ));
    }
}
