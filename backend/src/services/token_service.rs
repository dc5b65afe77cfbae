//! Lifecycle management for single-use verification and reset tokens.
//!
//! Each `(subject_email, purpose)` pair holds at most one live token.
//! Issuing a new one supersedes the previous token via the store's upsert.
//! A token ends its life in exactly one of three ways: consumed, superseded,
//! or deleted when expiry is detected on lookup.

use crate::database::models::{OutstandingToken, TokenPurpose};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::TokenStore;
use crate::utils::secret::generate_token;
use crate::utils::token_hash::TokenHasher;
use chrono::{Duration, Utc};

/// Issues, validates, and consumes outstanding tokens.
pub struct TokenService<S: TokenStore> {
    store: S,
    hasher: TokenHasher,
    ttl: Duration,
}

impl<S: TokenStore> TokenService<S> {
    /// Creates a new TokenService over a token store.
    pub fn new(store: S, hasher: TokenHasher, token_ttl_hours: i64) -> Self {
        Self {
            store,
            hasher,
            ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Issues a fresh token for a subject and purpose, replacing any prior
    /// unconsumed token for the same pair. Returns the raw secret for
    /// transport to the user; only its hash is stored.
    pub async fn issue(&self, subject_email: &str, purpose: TokenPurpose) -> ServiceResult<String> {
        let raw_token = generate_token()?;
        let token_hash = self.hasher.hash(&raw_token);
        let expires_at = Utc::now() + self.ttl;

        self.store
            .create_or_replace(subject_email, purpose, &token_hash, expires_at)
            .await?;

        Ok(raw_token)
    }

    /// Checks a presented token without consuming it.
    ///
    /// Unknown hash, purpose mismatch, and expiry all collapse into the same
    /// error. An expired row is deleted as a side effect, so later lookups
    /// behave as if it never existed.
    pub async fn validate(
        &self,
        raw_token: &str,
        purpose: TokenPurpose,
    ) -> ServiceResult<OutstandingToken> {
        let token_hash = self.hasher.hash(raw_token);

        let Some(token) = self.store.find_by_hash(&token_hash).await? else {
            return Err(ServiceError::TokenInvalidOrExpired);
        };

        if token.purpose != purpose {
            return Err(ServiceError::TokenInvalidOrExpired);
        }

        if token.is_expired_at(Utc::now()) {
            self.store.delete_by_hash(&token_hash).await?;
            return Err(ServiceError::TokenInvalidOrExpired);
        }

        Ok(token)
    }

    /// Validates and then deletes the token, returning its subject.
    ///
    /// The delete reports whether a row was removed, so of two concurrent
    /// consumers only one can succeed; the loser sees the same error as a
    /// token that never existed.
    pub async fn consume(&self, raw_token: &str, purpose: TokenPurpose) -> ServiceResult<String> {
        let token = self.validate(raw_token, purpose).await?;

        if !self.store.delete_by_hash(&token.token_hash).await? {
            return Err(ServiceError::TokenInvalidOrExpired);
        }

        Ok(token.subject_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::OutstandingToken;
    use crate::repositories::memory::InMemoryTokenStore;

    fn service() -> TokenService<InMemoryTokenStore> {
        let hasher = TokenHasher::new("test-secret").unwrap();
        TokenService::new(InMemoryTokenStore::new(), hasher, 24)
    }

    #[tokio::test]
    async fn test_issue_then_consume_returns_subject() {
        let svc = service();
        let raw = svc
            .issue("student@example.com", TokenPurpose::EmailVerification)
            .await
            .unwrap();

        let subject = svc
            .consume(&raw, TokenPurpose::EmailVerification)
            .await
            .unwrap();
        assert_eq!(subject, "student@example.com");
    }

    #[tokio::test]
    async fn test_raw_token_never_stored() {
        let svc = service();
        let raw = svc
            .issue("student@example.com", TokenPurpose::PasswordReset)
            .await
            .unwrap();

        // The store only knows the hash; looking up the raw value finds nothing.
        assert!(svc.store.find_by_hash(&raw).await.unwrap().is_none());
        assert!(
            svc.store
                .find_by_hash(&svc.hasher.hash(&raw))
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_second_consume_fails() {
        let svc = service();
        let raw = svc
            .issue("student@example.com", TokenPurpose::PasswordReset)
            .await
            .unwrap();

        svc.consume(&raw, TokenPurpose::PasswordReset).await.unwrap();
        assert!(matches!(
            svc.consume(&raw, TokenPurpose::PasswordReset).await,
            Err(ServiceError::TokenInvalidOrExpired)
        ));
    }

    #[tokio::test]
    async fn test_reissue_supersedes_prior_token() {
        let svc = service();
        let first = svc
            .issue("student@example.com", TokenPurpose::PasswordReset)
            .await
            .unwrap();
        let second = svc
            .issue("student@example.com", TokenPurpose::PasswordReset)
            .await
            .unwrap();

        assert!(matches!(
            svc.consume(&first, TokenPurpose::PasswordReset).await,
            Err(ServiceError::TokenInvalidOrExpired)
        ));
        assert!(
            svc.consume(&second, TokenPurpose::PasswordReset)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_purposes_do_not_cross() {
        let svc = service();
        let raw = svc
            .issue("student@example.com", TokenPurpose::EmailVerification)
            .await
            .unwrap();

        // A verification token presented to the reset flow is just invalid.
        assert!(matches!(
            svc.consume(&raw, TokenPurpose::PasswordReset).await,
            Err(ServiceError::TokenInvalidOrExpired)
        ));
        // The mismatch did not consume it.
        assert!(
            svc.consume(&raw, TokenPurpose::EmailVerification)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_validate_does_not_consume() {
        let svc = service();
        let raw = svc
            .issue("student@example.com", TokenPurpose::EmailVerification)
            .await
            .unwrap();

        svc.validate(&raw, TokenPurpose::EmailVerification)
            .await
            .unwrap();
        svc.validate(&raw, TokenPurpose::EmailVerification)
            .await
            .unwrap();
        assert_eq!(svc.store.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_token_rejected_and_removed() {
        let svc = service();
        let raw = generate_token().unwrap();
        svc.store.insert_raw(OutstandingToken {
            token_hash: svc.hasher.hash(&raw),
            purpose: TokenPurpose::PasswordReset,
            subject_email: "student@example.com".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
            created_at: Utc::now() - Duration::hours(25),
        });

        assert!(matches!(
            svc.validate(&raw, TokenPurpose::PasswordReset).await,
            Err(ServiceError::TokenInvalidOrExpired)
        ));
        // Expiry detection deletes the row.
        assert_eq!(svc.store.len(), 0);
    }

    #[tokio::test]
    async fn test_unknown_token_rejected() {
        let svc = service();
        assert!(matches!(
            svc.consume("deadbeef", TokenPurpose::EmailVerification).await,
            Err(ServiceError::TokenInvalidOrExpired)
        ));
    }

    #[tokio::test]
    async fn test_tokens_per_purpose_are_independent() {
        let svc = service();
        let verify = svc
            .issue("student@example.com", TokenPurpose::EmailVerification)
            .await
            .unwrap();
        let reset = svc
            .issue("student@example.com", TokenPurpose::PasswordReset)
            .await
            .unwrap();

        // Different purposes coexist for the same subject.
        assert_eq!(svc.store.len(), 2);
        assert!(
            svc.consume(&verify, TokenPurpose::EmailVerification)
                .await
                .is_ok()
        );
        assert!(svc.consume(&reset, TokenPurpose::PasswordReset).await.is_ok());
    }
}
