//! SQLite persistence adapters
//!
//! This module implements the repository ports for SQLite: the prestige
//! ledger and the cost schedule settings.

mod ledger_repository;
mod settings_repository;

pub use ledger_repository::SqliteLedgerRepository;
pub use settings_repository::SqliteSettingsRepository;

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Open the SQLite pool
///
/// In-memory databases are private to a connection, so they get a single
/// connection that is never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let in_memory = database_url.contains(":memory:");
    let options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    options
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to open SQLite database at {}", database_url))
}
