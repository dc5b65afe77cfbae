//! Core service modules.
//!
//! Business logic lives here, behind the store adapter traits in
//! `crate::repositories`.

pub mod email_service;
pub mod token_service;
