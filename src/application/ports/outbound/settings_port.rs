//! Settings port - Storage of the prestige cost schedule

use async_trait::async_trait;
use crate::domain::value_objects::{CostSchedule, ScheduleViolation};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Invalid cost schedule: {0}")]
    InvalidSchedule(#[from] ScheduleViolation),
}

/// Persisted overrides of the environment cost schedule
///
/// `get` returns the stored values as they are; checking them against the
/// economy rules is left to the caller.
#[async_trait]
pub trait SettingsRepositoryPort: Send + Sync {
    async fn get(&self) -> Result<CostSchedule, SettingsError>;
    async fn save(&self, settings: &CostSchedule) -> Result<(), SettingsError>;
    /// Drop every override and return the environment schedule
    async fn reset(&self) -> Result<CostSchedule, SettingsError>;
}
