//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for login, email
//! verification, and password reset, parse request data, and hand off to
//! `auth::service` for the core business logic.

use crate::api::common::service_error_to_http;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, String)> {
    let auth_service = match AuthService::from_pool(&pool, &config) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle a request to send an email-verification link
#[axum::debug_handler]
pub async fn request_email_verification(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<TokenRequest>,
) -> Result<ResponseJson<serde_json::Value>, (StatusCode, String)> {
    let auth_service = match AuthService::from_pool(&pool, &config) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.request_email_verification(payload).await {
        // Uniform response whether or not the address is registered.
        Ok(()) => Ok(ResponseJson(serde_json::json!({
            "message": "If the address is registered, a verification email has been sent"
        }))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle a request to send a password-reset link
#[axum::debug_handler]
pub async fn request_password_reset(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<TokenRequest>,
) -> Result<ResponseJson<serde_json::Value>, (StatusCode, String)> {
    let auth_service = match AuthService::from_pool(&pool, &config) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.request_password_reset(payload).await {
        Ok(()) => Ok(ResponseJson(serde_json::json!({
            "message": "If the address is registered, a password reset email has been sent"
        }))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle email-verification confirmation from the emailed link
#[axum::debug_handler]
pub async fn confirm_email_verification(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<ConfirmVerificationRequest>,
) -> Result<ResponseJson<serde_json::Value>, (StatusCode, String)> {
    let auth_service = match AuthService::from_pool(&pool, &config) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.confirm_email_verification(payload).await {
        Ok(()) => Ok(ResponseJson(serde_json::json!({
            "message": "Email verified successfully"
        }))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle password-reset confirmation from the emailed link
#[axum::debug_handler]
pub async fn confirm_password_reset(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<ConfirmResetRequest>,
) -> Result<ResponseJson<serde_json::Value>, (StatusCode, String)> {
    let auth_service = match AuthService::from_pool(&pool, &config) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.confirm_password_reset(payload).await {
        Ok(()) => Ok(ResponseJson(serde_json::json!({
            "message": "Password reset successfully"
        }))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout request (client-side token invalidation)
#[axum::debug_handler]
pub async fn logout() -> Result<ResponseJson<serde_json::Value>, (StatusCode, String)> {
    // Session claims are self-contained, so logout is handled on the client
    // by discarding the token.
    Ok(ResponseJson(serde_json::json!({
        "message": "Logged out successfully"
    })))
}

/// Get current user information from validated session claims
#[axum::debug_handler]
pub async fn me(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<UserInfo>, (StatusCode, String)> {
    let auth_service = match AuthService::from_pool(&pool, &config) {
        Ok(service) => service,
        Err(error) => return Err(service_error_to_http(error)),
    };

    match auth_service.current_user(&claims.email).await {
        Ok(user_info) => Ok(ResponseJson(user_info)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
