//! HTTP API surface shared helpers.

pub mod common;
