//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle login, token request/confirmation for email
//! verification and password reset, and the authenticated `/me` endpoint.
//! They are designed to be integrated into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/request-verification", post(request_email_verification))
        .route("/request-reset", post(request_password_reset))
        .route("/confirm-verification", post(confirm_email_verification))
        .route("/confirm-reset", post(confirm_password_reset))
        .route("/logout", post(logout))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}
