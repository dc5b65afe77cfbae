//! Database repository for outstanding token rows.
//!
//! Issuance relies on the `(subject_email, purpose)` unique constraint: the
//! upsert atomically replaces any previously issued token for the same pair.
//! Consumption relies on `DELETE` reporting the affected row count, so two
//! racing consumers cannot both succeed.

use crate::database::models::{OutstandingToken, TokenPurpose};
use crate::repositories::TokenStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// SQLite-backed implementation of [`TokenStore`].
pub struct SqliteTokenRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> SqliteTokenRepository<'a> {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for SqliteTokenRepository<'_> {
    async fn create_or_replace(
        &self,
        subject_email: &str,
        purpose: TokenPurpose,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO outstanding_tokens (token_hash, purpose, subject_email, expires_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (subject_email, purpose) DO UPDATE SET
                token_hash = excluded.token_hash,
                expires_at = excluded.expires_at,
                created_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(token_hash)
        .bind(purpose)
        .bind(subject_email)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<OutstandingToken>> {
        let token = sqlx::query_as::<_, OutstandingToken>(
            r#"
            SELECT token_hash, purpose, subject_email, expires_at, created_at
            FROM outstanding_tokens
            WHERE token_hash = ?
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(token)
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM outstanding_tokens
            WHERE token_hash = ?
            "#,
        )
        .bind(token_hash)
        .execute(self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
