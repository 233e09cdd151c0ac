//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::application::ports::outbound::LedgerRepositoryPort;
use crate::application::services::{HostAdapters, PrestigeService, SettingsService};
use crate::domain::aggregates::PrestigeLedger;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::host::{HostCatalog, InMemoryHost};
use crate::infrastructure::persistence::{
    connect, SqliteLedgerRepository, SqliteSettingsRepository,
};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Simulated game host, exposed for the host routes
    pub host: Arc<InMemoryHost>,
    // Application services
    pub settings_service: Arc<SettingsService>,
    pub prestige_service: Arc<PrestigeService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize SQLite repositories
        let pool = connect(&config.database_url).await?;
        let settings_repository = SqliteSettingsRepository::new(pool.clone())
            .await
            .context("Failed to prepare settings table")?;
        let ledger_repository = SqliteLedgerRepository::new(pool)
            .await
            .context("Failed to prepare prestige ledger table")?;

        let records = ledger_repository
            .load_all()
            .await
            .context("Failed to load prestige ledger")?;
        let ledger = Arc::new(PrestigeLedger::from_records(records));
        info!(records = ledger.record_count().await, "Prestige ledger loaded");

        // Initialize the host
        let catalog = HostCatalog::load(config.catalog_path.as_deref())?;
        let host = Arc::new(InMemoryHost::new(catalog, ledger.clone()));

        Self::with_parts(
            config,
            host,
            ledger,
            Arc::new(settings_repository),
            Arc::new(ledger_repository),
        )
        .await
    }

    /// Assemble the services from already-built adapters
    pub async fn with_parts(
        config: AppConfig,
        host: Arc<InMemoryHost>,
        ledger: Arc<PrestigeLedger>,
        settings_repository: Arc<SqliteSettingsRepository>,
        ledger_repository: Arc<SqliteLedgerRepository>,
    ) -> Result<Self> {
        let settings_service = Arc::new(SettingsService::new(settings_repository));

        let adapters = HostAdapters {
            catalog: host.clone(),
            experience: host.clone(),
            recipes: host.clone(),
            effects: host.clone(),
        };
        let prestige_service = Arc::new(
            PrestigeService::load(ledger, adapters, settings_service.clone(), ledger_repository)
                .await?,
        );

        Ok(Self {
            config,
            host,
            settings_service,
            prestige_service,
        })
    }
}
