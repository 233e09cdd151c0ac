//! Settings Service - Cached access to the prestige cost schedule
//!
//! Every schedule handed out has passed `CostSchedule::validate`. A stored or
//! environment schedule that breaks the economy rules is replaced by the
//! defaults and logged.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use crate::application::ports::outbound::{SettingsRepositoryPort, SettingsError};
use crate::domain::value_objects::CostSchedule;

pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryPort>,
    cache: RwLock<Option<CostSchedule>>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryPort>) -> Self {
        Self {
            repository,
            cache: RwLock::new(None),
        }
    }

    /// Get the current cost schedule (cached)
    pub async fn get(&self) -> CostSchedule {
        let cache = self.cache.read().await;
        if let Some(settings) = &*cache {
            return settings.clone();
        }
        drop(cache);

        // Load from DB
        match self.repository.get().await {
            Ok(settings) => {
                let settings = enforce_rules(settings);
                *self.cache.write().await = Some(settings.clone());
                settings
            }
            Err(e) => {
                warn!(error = %e, "Failed to load cost schedule, falling back to environment");
                enforce_rules(CostSchedule::from_env())
            }
        }
    }

    /// Validate and store a new schedule, replacing the cached one
    pub async fn update(&self, settings: CostSchedule) -> Result<(), SettingsError> {
        settings.validate()?;
        self.repository.save(&settings).await?;
        info!(?settings, "Cost schedule updated");
        *self.cache.write().await = Some(settings);
        Ok(())
    }

    /// Reset to env/defaults and clear DB values
    pub async fn reset(&self) -> Result<CostSchedule, SettingsError> {
        let settings = enforce_rules(self.repository.reset().await?);
        *self.cache.write().await = Some(settings.clone());
        Ok(settings)
    }
}

fn enforce_rules(settings: CostSchedule) -> CostSchedule {
    match settings.validate() {
        Ok(()) => settings,
        Err(violation) => {
            error!(error = %violation, ?settings, "Cost schedule breaks the prestige rules, using defaults");
            CostSchedule::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ProfessionTier, ScheduleViolation};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingRepository {
        stored: std::sync::Mutex<Option<CostSchedule>>,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl SettingsRepositoryPort for CountingRepository {
        async fn get(&self) -> Result<CostSchedule, SettingsError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
        }

        async fn save(&self, settings: &CostSchedule) -> Result<(), SettingsError> {
            *self.stored.lock().unwrap() = Some(settings.clone());
            Ok(())
        }

        async fn reset(&self) -> Result<CostSchedule, SettingsError> {
            *self.stored.lock().unwrap() = None;
            Ok(CostSchedule::default())
        }
    }

    #[tokio::test]
    async fn test_get_is_cached() {
        let repository = Arc::new(CountingRepository::default());
        let service = SettingsService::new(repository.clone());

        assert_eq!(service.get().await, CostSchedule::default());
        service.get().await;

        assert_eq!(repository.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_schedule() {
        let repository = Arc::new(CountingRepository::default());
        let service = SettingsService::new(repository.clone());

        let invalid = CostSchedule {
            tier_one_cost: 0,
            ..CostSchedule::default()
        };
        let result = service.update(invalid).await;

        assert!(matches!(
            result,
            Err(SettingsError::InvalidSchedule(ScheduleViolation::FreeProfessions(ProfessionTier::One)))
        ));
        assert!(repository.stored.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_then_reset() {
        let repository = Arc::new(CountingRepository::default());
        let service = SettingsService::new(repository);

        let custom = CostSchedule {
            tier_two_cost: 5,
            ..CostSchedule::default()
        };
        service.update(custom.clone()).await.unwrap();
        assert_eq!(service.get().await, custom);

        let reset = service.reset().await.unwrap();
        assert_eq!(reset, CostSchedule::default());
        assert_eq!(service.get().await, CostSchedule::default());
    }

    #[tokio::test]
    async fn test_stored_schedule_breaking_rules_is_replaced() {
        let repository = Arc::new(CountingRepository::default());
        *repository.stored.lock().unwrap() = Some(CostSchedule {
            tier_one_cost: 0,
            points_per_reset: 0,
            ..CostSchedule::default()
        });
        let service = SettingsService::new(repository.clone());

        let schedule = service.get().await;

        assert_eq!(schedule, CostSchedule::default());
        assert!(schedule.validate().is_ok());
        service.get().await;
        assert_eq!(repository.loads.load(Ordering::SeqCst), 1);
    }
}
