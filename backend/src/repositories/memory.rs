//! In-memory store implementations for tests.
//!
//! These sit behind the same adapter traits as the SQLite repositories so
//! service-level tests can run without a database. Not a production design.

use crate::database::models::{OutstandingToken, TokenPurpose, User};
use crate::repositories::{IdentityStore, TokenStore};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryTokenStore {
    rows: Mutex<HashMap<String, OutstandingToken>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing issuance. Used to stage expired
    /// tokens in tests.
    pub fn insert_raw(&self, token: OutstandingToken) {
        self.rows
            .lock()
            .unwrap()
            .insert(token.token_hash.clone(), token);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn create_or_replace(
        &self,
        subject_email: &str,
        purpose: TokenPurpose,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|_, t| !(t.subject_email == subject_email && t.purpose == purpose));
        rows.insert(
            token_hash.to_string(),
            OutstandingToken {
                token_hash: token_hash.to_string(),
                purpose,
                subject_email: subject_email.to_string(),
                expires_at,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<OutstandingToken>> {
        Ok(self.rows.lock().unwrap().get(token_hash).cloned())
    }

    async fn delete_by_hash(&self, token_hash: &str) -> Result<bool> {
        Ok(self.rows.lock().unwrap().remove(token_hash).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryIdentityStore {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id.clone(), user);
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_email_verified(&self, id: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("user {id} not found"))?;
        user.email_verified = true;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("user {id} not found"))?;
        user.password_hash = Some(password_hash.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }
}
