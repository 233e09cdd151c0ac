//! SQLite storage for prestige records
//!
//! One row per skill, with the record serialized as JSON. Saving replaces
//! the previous row for that skill.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{LedgerRepositoryError, LedgerRepositoryPort};
use crate::domain::entities::PrestigeRecord;

pub struct SqliteLedgerRepository {
    pool: SqlitePool,
}

impl SqliteLedgerRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS prestige_records (
                skill TEXT PRIMARY KEY,
                record TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#).execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl LedgerRepositoryPort for SqliteLedgerRepository {
    async fn load_all(&self) -> Result<Vec<PrestigeRecord>, LedgerRepositoryError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT skill, record FROM prestige_records ORDER BY skill")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| LedgerRepositoryError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|(skill, json)| {
                serde_json::from_str(&json).map_err(|e| {
                    LedgerRepositoryError::Serialization(format!("record for {}: {}", skill, e))
                })
            })
            .collect()
    }

    async fn save(&self, record: &PrestigeRecord) -> Result<(), LedgerRepositoryError> {
        let json = serde_json::to_string(record)
            .map_err(|e| LedgerRepositoryError::Serialization(e.to_string()))?;

        sqlx::query("INSERT OR REPLACE INTO prestige_records (skill, record, updated_at) VALUES (?, ?, ?)")
            .bind(record.skill.as_str())
            .bind(json)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| LedgerRepositoryError::Database(e.to_string()))?;

        Ok(())
    }
}
