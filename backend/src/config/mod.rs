//! Central module for application-wide configuration settings.
//!
//! Loads everything from the environment once at startup. The token hashing
//! secret and the JWT secret are required; a missing value aborts startup
//! instead of degrading to a per-request fallback.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Server-wide secret mixed into stored token hashes. Rotating it
    /// invalidates every outstanding token.
    pub token_hash_secret: String,
    pub jwt_secret: String,
    /// Session claim lifetime in days.
    pub session_ttl_days: i64,
    /// Lifetime of verification and reset tokens in hours.
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_email: String,
    pub from_name: String,
    pub base_url: String,
}

/// SMTP settings extracted from the main config when mail is enabled.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    pub base_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let token_hash_secret =
            env::var("TOKEN_HASH_SECRET").context("TOKEN_HASH_SECRET not set")?;
        if token_hash_secret.trim().is_empty() {
            anyhow::bail!("TOKEN_HASH_SECRET must not be empty");
        }

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let session_ttl_days = env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<i64>()
            .context("SESSION_TTL_DAYS must be a valid number")?;

        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<i64>()
            .context("TOKEN_TTL_HOURS must be a valid number")?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let smtp_host = env::var("SMTP_HOST").ok();
        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid number")?;
        let smtp_username = env::var("SMTP_USERNAME").ok();
        let smtp_password = env::var("SMTP_PASSWORD").ok();

        let from_email =
            env::var("FROM_EMAIL").unwrap_or_else(|_| "no-reply@coursegate.app".to_string());
        let from_name = env::var("FROM_NAME").unwrap_or_else(|_| "CourseGate".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            token_hash_secret,
            jwt_secret,
            session_ttl_days,
            token_ttl_hours,
            bcrypt_cost,
            server_port,
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_email,
            from_name,
            base_url,
        })
    }

    /// Returns SMTP settings when all required fields are present.
    pub fn email_config(&self) -> Option<EmailConfig> {
        let smtp_host = self.smtp_host.clone()?;
        let smtp_username = self.smtp_username.clone()?;
        let smtp_password = self.smtp_password.clone()?;

        Some(EmailConfig {
            smtp_host,
            smtp_port: self.smtp_port,
            smtp_username,
            smtp_password,
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
            base_url: self.base_url.clone(),
        })
    }
}
