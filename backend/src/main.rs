//! Main entry point for the CourseGate auth backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers the authentication routes. Configuration is
//! loaded once here; a missing secret aborts startup.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let pool = db.pool().clone();

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router())
        .layer(Extension(pool))
        .layer(Extension(config.clone()));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting CourseGate auth server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "CourseGate Auth Backend",
            "version": "0.1.0"
        }),
        "Welcome to the CourseGate API",
    ))
}
