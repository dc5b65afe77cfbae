//! Authentication module: credential verification and token lifecycle.
//!
//! This module provides the public interface for login, email verification,
//! password reset, and the middleware that guards authenticated routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
