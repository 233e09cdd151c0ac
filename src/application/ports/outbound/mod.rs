//! Outbound ports - Interfaces that the application requires from external systems

mod host_port;
mod ledger_repository_port;
mod settings_port;

pub use host_port::{
    EffectApplierPort, ExperienceStorePort, HostError, RecipeRemoverPort, SkillCatalogPort,
};
pub use ledger_repository_port::{LedgerRepositoryError, LedgerRepositoryPort};
pub use settings_port::{SettingsError, SettingsRepositoryPort};
