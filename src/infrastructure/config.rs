//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database holding the ledger and settings
    pub database_url: String,

    /// Skill catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,

    /// Seconds between automatic ledger saves, 0 disables autosave
    pub autosave_interval_secs: u64,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("PRESTIGE_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:prestige.db?mode=rwc".to_string()),

            catalog_path: env::var("PRESTIGE_CATALOG_PATH").ok().map(PathBuf::from),

            autosave_interval_secs: env::var("PRESTIGE_AUTOSAVE_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .context("PRESTIGE_AUTOSAVE_SECS must be a number of seconds")?,

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}
