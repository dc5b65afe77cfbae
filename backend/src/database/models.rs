//! Row models shared between the repositories and the service layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Instructor,
    Admin,
}

/// What an outstanding token is allowed to be consumed for. Purpose scopes
/// both lookup and the single-flight uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

/// A user identity as stored.
///
/// `password_hash` is `None` for accounts created through an external
/// identity provider; those accounts cannot log in with a password.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A live verification or reset token, stored by hash only. Rows are never
/// mutated: a token is created on issuance and deleted on consumption,
/// supersession, or expiry detection.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OutstandingToken {
    pub token_hash: String,
    pub purpose: TokenPurpose,
    pub subject_email: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OutstandingToken {
    /// Whether the token's lifetime has elapsed at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
