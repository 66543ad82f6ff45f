//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tgvault_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    // Initialize telemetry before anything that logs
    crate::telemetry::init_telemetry(config.log_json())?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage pools
    let (bot_pool, client_pool) = storage::setup_storage(&config);

    // Initialize services and application state
    let state = services::initialize_services(&config, pool, bot_pool, client_pool);

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
