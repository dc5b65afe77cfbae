//! Core business logic for the authentication system.
//!
//! Orchestrates credential verification, token issuance and consumption,
//! and session claim generation over the store adapter traits. Failure
//! detail is deliberately flattened: a caller cannot distinguish an unknown
//! account from a bad password, or an expired token from a consumed one.

use crate::auth::models::*;
use crate::config::Config;
use crate::database::models::{TokenPurpose, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::token_repository::SqliteTokenRepository;
use crate::repositories::user_repository::SqliteUserRepository;
use crate::repositories::{IdentityStore, TokenStore};
use crate::services::email_service::EmailService;
use crate::services::token_service::TokenService;
use crate::utils::jwt::JwtUtils;
use crate::utils::normalize_email;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::token_hash::TokenHasher;
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for login, verification, and password reset.
pub struct AuthService<U: IdentityStore, T: TokenStore> {
    users: U,
    tokens: TokenService<T>,
    email_service: Option<EmailService>,
    jwt_utils: JwtUtils,
    bcrypt_cost: u32,
}

impl<'a> AuthService<SqliteUserRepository<'a>, SqliteTokenRepository<'a>> {
    /// Wires the service over the shared pool with the SQLite stores.
    pub fn from_pool(pool: &'a SqlitePool, config: &Config) -> ServiceResult<Self> {
        let hasher = TokenHasher::new(&config.token_hash_secret)?;
        let tokens = TokenService::new(
            SqliteTokenRepository::new(pool),
            hasher,
            config.token_ttl_hours,
        );
        let jwt_utils = JwtUtils::new(&config.jwt_secret, config.session_ttl_days)?;

        let email_service = match config.email_config() {
            Some(email_config) => match EmailService::new(email_config) {
                Ok(service) => Some(service),
                Err(e) => {
                    tracing::warn!(
                        "Failed to initialize email service: {}. Email delivery disabled.",
                        e
                    );
                    None
                }
            },
            None => None,
        };

        Ok(AuthService::new(
            SqliteUserRepository::new(pool),
            tokens,
            email_service,
            jwt_utils,
            config.bcrypt_cost,
        ))
    }
}

impl<U: IdentityStore, T: TokenStore> AuthService<U, T> {
    /// Creates an AuthService from its parts. Tests use this with in-memory
    /// stores; production goes through [`AuthService::from_pool`].
    pub fn new(
        users: U,
        tokens: TokenService<T>,
        email_service: Option<EmailService>,
        jwt_utils: JwtUtils,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            tokens,
            email_service,
            jwt_utils,
            bcrypt_cost,
        }
    }

    /// Authenticates a user and issues session claims.
    ///
    /// Unknown email, wrong password, and an account without a password hash
    /// (external-provider-only) all return the identical error.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        validate_request(&login_request)?;

        let email = normalize_email(&login_request.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(ServiceError::InvalidCredentials);
        };

        let Some(password_hash) = user.password_hash.as_deref() else {
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(&login_request.password, password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        let access_token = self.jwt_utils.generate_token(&user)?;
        let expires_in = self.jwt_utils.expires_in_seconds();

        Ok(LoginResponse {
            access_token,
            user: UserInfo::from(user),
            expires_in,
        })
    }

    /// Issues an email-verification token and mails it to the address.
    ///
    /// Succeeds uniformly whether or not the address is registered; an
    /// unknown or already-verified address is a silent no-op.
    pub async fn request_email_verification(&self, request: TokenRequest) -> ServiceResult<()> {
        validate_request(&request)?;
        let email = normalize_email(&request.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::debug!("Verification requested for unregistered address");
            return Ok(());
        };

        if user.email_verified {
            return Ok(());
        }

        let raw_token = self
            .tokens
            .issue(&email, TokenPurpose::EmailVerification)
            .await?;

        self.try_send_email(&email, &raw_token, TokenPurpose::EmailVerification)
            .await;

        Ok(())
    }

    /// Issues a password-reset token and mails it to the address.
    ///
    /// Succeeds uniformly whether or not the address is registered.
    pub async fn request_password_reset(&self, request: TokenRequest) -> ServiceResult<()> {
        validate_request(&request)?;
        let email = normalize_email(&request.email);

        if self.users.find_by_email(&email).await?.is_none() {
            tracing::debug!("Password reset requested for unregistered address");
            return Ok(());
        }

        let raw_token = self
            .tokens
            .issue(&email, TokenPurpose::PasswordReset)
            .await?;

        self.try_send_email(&email, &raw_token, TokenPurpose::PasswordReset)
            .await;

        Ok(())
    }

    /// Consumes a verification token and marks the subject's email verified.
    pub async fn confirm_email_verification(
        &self,
        request: ConfirmVerificationRequest,
    ) -> ServiceResult<()> {
        validate_request(&request)?;

        let subject_email = self
            .tokens
            .consume(&request.token, TokenPurpose::EmailVerification)
            .await?;

        let user = self.require_subject(&subject_email).await?;
        self.users.update_email_verified(&user.id).await?;

        tracing::info!("Email verified for user {}", user.id);
        Ok(())
    }

    /// Consumes a reset token and replaces the subject's password hash.
    /// The token is gone before the new hash is written, so a replay cannot
    /// reset the password twice.
    pub async fn confirm_password_reset(&self, request: ConfirmResetRequest) -> ServiceResult<()> {
        validate_request(&request)?;

        let subject_email = self
            .tokens
            .consume(&request.token, TokenPurpose::PasswordReset)
            .await?;

        let user = self.require_subject(&subject_email).await?;
        let new_hash = hash_password(&request.new_password, self.bcrypt_cost)?;
        self.users.update_password_hash(&user.id, &new_hash).await?;

        tracing::info!("Password reset completed for user {}", user.id);
        Ok(())
    }

    /// Looks up the current user behind a set of validated claims.
    pub async fn current_user(&self, email: &str) -> ServiceResult<UserInfo> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        Ok(UserInfo::from(user))
    }

    /// Resolves a token subject back to an identity. A subject that no
    /// longer exists surfaces as the generic token error.
    async fn require_subject(&self, subject_email: &str) -> ServiceResult<User> {
        self.users
            .find_by_email(subject_email)
            .await?
            .ok_or(ServiceError::TokenInvalidOrExpired)
    }

    /// Hands the raw token to the mail dispatcher, logging but never failing
    /// the request when delivery is unavailable.
    async fn try_send_email(&self, email: &str, raw_token: &str, purpose: TokenPurpose) {
        let Some(ref email_service) = self.email_service else {
            tracing::warn!("Email service not configured. Token email not sent.");
            return;
        };

        let result = match purpose {
            TokenPurpose::EmailVerification => {
                email_service.send_verification_email(email, raw_token).await
            }
            TokenPurpose::PasswordReset => {
                email_service
                    .send_password_reset_email(email, raw_token)
                    .await
            }
        };

        match result {
            Ok(()) => tracing::info!("Token email sent"),
            Err(e) => tracing::error!("Failed to send token email: {}", e),
        }
    }
}

/// Flattens validator output into a single validation error, teacher-style.
fn validate_request<R: Validate>(request: &R) -> ServiceResult<()> {
    if let Err(validation_errors) = request.validate() {
        let error_messages: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        return Err(ServiceError::validation(error_messages.join(", ")));
    }

    Ok(())
}
