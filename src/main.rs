//! Skill Prestige - Prestige point ledger and profession purchase engine
//!
//! The service:
//! - Keeps a per-skill ledger of prestige points and permanent professions
//! - Trades skill experience for prestige points on reset
//! - Sells professions for prestige points
//! - Persists the ledger and cost schedule in SQLite

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skill_prestige=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Skill Prestige");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Database: {}", config.database_url);
    match &config.catalog_path {
        Some(path) => tracing::info!("  Catalog: {}", path.display()),
        None => tracing::info!("  Catalog: built-in"),
    }

    // Initialize application state
    let state = AppState::new(config).await?;
    let state = Arc::new(state);
    tracing::info!("Application state initialized");

    // Autosave worker (writes the ledger on an interval)
    let autosave_worker = {
        let service = state.prestige_service.clone();
        let interval_secs = state.config.autosave_interval_secs;
        tokio::spawn(async move {
            if interval_secs == 0 {
                tracing::info!("Ledger autosave disabled");
                return;
            }
            tracing::info!("Starting ledger autosave worker");
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = service.persist().await {
                    tracing::error!("Ledger autosave failed: {}", e);
                }
            }
        })
    };

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        // Merge REST API routes
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
            autosave_worker.abort();
        }
    }

    // Final ledger save
    match state.prestige_service.persist().await {
        Ok(saved) => tracing::info!("Saved {} prestige records", saved),
        Err(e) => tracing::error!("Failed to save prestige ledger: {}", e),
    }

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
