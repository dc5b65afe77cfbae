//! Store adapters for identities and outstanding tokens.
//!
//! The service layer talks to these traits only. Production uses the SQLite
//! implementations; tests plug in in-memory maps behind the same interface.

use crate::database::models::{OutstandingToken, TokenPurpose, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod token_repository;
pub mod user_repository;

#[cfg(test)]
pub mod memory;

/// Persistence interface for user identities.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Looks up an identity by its normalized email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Marks the identity's email address as verified.
    async fn update_email_verified(&self, id: &str) -> Result<()>;

    /// Replaces the identity's stored password hash.
    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<()>;
}

/// Persistence interface for outstanding single-use tokens.
///
/// Implementations must enforce uniqueness on the token hash and on
/// `(subject_email, purpose)`, and `delete_by_hash` must be atomic: of two
/// racing consumers, exactly one sees `true`.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Upserts the token row for `(subject_email, purpose)`, replacing any
    /// previously issued token for the same pair.
    async fn create_or_replace(
        &self,
        subject_email: &str,
        purpose: TokenPurpose,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Looks up a token row by its stored hash.
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<OutstandingToken>>;

    /// Deletes a token row, reporting whether a row was actually removed.
    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool>;
}

// Shared references delegate, so callers can keep a handle to the store
// while services hold their own.

#[async_trait]
impl<S> IdentityStore for &S
where
    S: IdentityStore + ?Sized,
{
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        (**self).find_by_email(email).await
    }

    async fn update_email_verified(&self, id: &str) -> Result<()> {
        (**self).update_email_verified(id).await
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<()> {
        (**self).update_password_hash(id, password_hash).await
    }
}

#[async_trait]
impl<S> TokenStore for &S
where
    S: TokenStore + ?Sized,
{
    async fn create_or_replace(
        &self,
        subject_email: &str,
        purpose: TokenPurpose,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        (**self)
            .create_or_replace(subject_email, purpose, token_hash, expires_at)
            .await
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<OutstandingToken>> {
        (**self).find_by_hash(token_hash).await
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool> {
        (**self).delete_by_hash(token_hash).await
    }
}
