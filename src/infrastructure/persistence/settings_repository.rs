//! SQLite storage of cost schedule overrides
//!
//! One row per schedule field. Fields without a row, or whose value does not
//! parse, keep the environment value.

use async_trait::async_trait;
use sqlx::SqlitePool;
use crate::application::ports::outbound::{SettingsRepositoryPort, SettingsError};
use crate::domain::value_objects::CostSchedule;

pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#).execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SettingsRepositoryPort for SqliteSettingsRepository {
    async fn get(&self) -> Result<CostSchedule, SettingsError> {
        let mut settings = CostSchedule::from_env(); // Start with env defaults

        // Override with DB values
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SettingsError::Database(e.to_string()))?;

        for (key, value) in rows {
            match key.as_str() {
                "tier_one_cost" => if let Ok(v) = value.parse() { settings.tier_one_cost = v; },
                "tier_two_cost" => if let Ok(v) = value.parse() { settings.tier_two_cost = v; },
                "points_per_reset" => if let Ok(v) = value.parse() { settings.points_per_reset = v; },
                "experience_cost_per_reset" => if let Ok(v) = value.parse() { settings.experience_cost_per_reset = v; },
                _ => {}
            }
        }

        Ok(settings)
    }

    async fn save(&self, settings: &CostSchedule) -> Result<(), SettingsError> {
        let pairs = [
            ("tier_one_cost", settings.tier_one_cost.to_string()),
            ("tier_two_cost", settings.tier_two_cost.to_string()),
            ("points_per_reset", settings.points_per_reset.to_string()),
            ("experience_cost_per_reset", settings.experience_cost_per_reset.to_string()),
        ];

        for (key, value) in pairs {
            sqlx::query("INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)")
                .bind(key)
                .bind(value)
                .execute(&self.pool)
                .await
                .map_err(|e| SettingsError::Database(e.to_string()))?;
        }

        Ok(())
    }

    async fn reset(&self) -> Result<CostSchedule, SettingsError> {
        sqlx::query("DELETE FROM settings")
            .execute(&self.pool)
            .await
            .map_err(|e| SettingsError::Database(e.to_string()))?;

        Ok(CostSchedule::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::application::services::SettingsService;
    use crate::infrastructure::persistence::connect;

    #[tokio::test]
    async fn test_save_get_reset() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repository = SqliteSettingsRepository::new(pool).await.unwrap();

        let custom = CostSchedule {
            tier_one_cost: 2,
            tier_two_cost: 4,
            points_per_reset: 3,
            experience_cost_per_reset: 0,
        };
        repository.save(&custom).await.unwrap();
        assert_eq!(repository.get().await.unwrap(), custom);

        repository.reset().await.unwrap();
        assert_eq!(repository.get().await.unwrap(), CostSchedule::from_env());
    }

    #[tokio::test]
    async fn test_zero_overrides_are_never_served() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repository = SqliteSettingsRepository::new(pool.clone()).await.unwrap();
        sqlx::query("INSERT INTO settings (key, value) VALUES ('tier_one_cost', '0'), ('points_per_reset', '0')")
            .execute(&pool)
            .await
            .unwrap();

        let stored = repository.get().await.unwrap();
        assert_eq!(stored.tier_one_cost, 0);
        assert!(stored.validate().is_err());

        let service = SettingsService::new(Arc::new(repository));
        assert_eq!(service.get().await, CostSchedule::default());
    }
}
