//! Host ports - Interfaces to the game hosting the prestige economy
//!
//! The prestige service never touches skills, experience or recipes
//! directly. The host provides them through these narrow traits, which keeps
//! the point accounting testable without a running game.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::SkillDefinition;
use crate::domain::value_objects::SkillId;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Skill not known to the host: {0}")]
    UnknownSkill(SkillId),
    #[error("Host storage error: {0}")]
    Storage(String),
}

/// Every skill the host defines, with the professions each one offers
#[async_trait]
pub trait SkillCatalogPort: Send + Sync {
    async fn all_skills(&self) -> Result<Vec<SkillDefinition>, HostError>;
}

/// Read and write access to skill experience
#[async_trait]
pub trait ExperienceStorePort: Send + Sync {
    async fn get_experience(&self, skill: &SkillId) -> Result<i64, HostError>;
    async fn set_experience(&self, skill: &SkillId, experience: i64) -> Result<(), HostError>;
}

/// Removes the recipes a skill granted the player
///
/// Both methods return the removed recipes with the number of times each
/// was made, so they can be restored later.
#[async_trait]
pub trait RecipeRemoverPort: Send + Sync {
    async fn remove_crafting_recipes(&self, skill: &SkillId) -> Result<HashMap<String, i32>, HostError>;
    async fn remove_cooking_recipes(&self, skill: &SkillId) -> Result<HashMap<String, i32>, HostError>;
}

/// Grants the gameplay effects of every permanently purchased profession
#[async_trait]
pub trait EffectApplierPort: Send + Sync {
    async fn ensure_profession_effects_applied(&self) -> Result<(), HostError>;
}
