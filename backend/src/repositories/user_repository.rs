//! Database repository for user identity operations.
//!
//! Provides the subset of user persistence the auth core needs: lookup by
//! email and the two mutations performed on token consumption.

use crate::database::models::User;
use crate::repositories::IdentityStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// SQLite-backed implementation of [`IdentityStore`].
pub struct SqliteUserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> SqliteUserRepository<'a> {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for SqliteUserRepository<'_> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, email_verified, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    async fn update_email_verified(&self, id: &str) -> Result<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET email_verified = 1,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(anyhow!("user {id} not found"));
        }

        Ok(())
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .execute(self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(anyhow!("user {id} not found"));
        }

        Ok(())
    }
}
