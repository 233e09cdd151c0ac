use async_trait::async_trait;

use crate::domain::entities::PrestigeRecord;

#[derive(Debug, thiserror::Error)]
pub enum LedgerRepositoryError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage for the prestige records of a save
#[async_trait]
pub trait LedgerRepositoryPort: Send + Sync {
    async fn load_all(&self) -> Result<Vec<PrestigeRecord>, LedgerRepositoryError>;
    async fn save(&self, record: &PrestigeRecord) -> Result<(), LedgerRepositoryError>;
}
