//! In-memory host - A simulated player implementing the host ports
//!
//! Stands in for the game when the engine runs as a standalone service.
//! Effect application reads the ledger it is handed at construction, so
//! purchased professions are granted without any global state. While no
//! save is loaded every player operation fails with a storage error.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::application::ports::outbound::{
    EffectApplierPort, ExperienceStorePort, HostError, RecipeRemoverPort, SkillCatalogPort,
};
use crate::domain::aggregates::PrestigeLedger;
use crate::domain::entities::SkillDefinition;
use crate::domain::value_objects::{ProfessionId, SkillId};

use super::catalog::{HostCatalog, RecipeDefinition};

#[derive(Debug, Default)]
struct PlayerState {
    experience: HashMap<SkillId, i64>,
    /// Known recipe -> times made
    crafting_recipes: HashMap<String, i32>,
    cooking_recipes: HashMap<String, i32>,
    professions: BTreeSet<ProfessionId>,
}

pub struct InMemoryHost {
    catalog: HostCatalog,
    ledger: Arc<PrestigeLedger>,
    player: RwLock<PlayerState>,
    save_loaded: AtomicBool,
}

impl InMemoryHost {
    pub fn new(catalog: HostCatalog, ledger: Arc<PrestigeLedger>) -> Self {
        Self {
            catalog,
            ledger,
            player: RwLock::new(PlayerState::default()),
            save_loaded: AtomicBool::new(true),
        }
    }

    /// Load or unload the player's save, e.g. on returning to the title screen
    pub fn set_save_loaded(&self, loaded: bool) {
        self.save_loaded.store(loaded, Ordering::SeqCst);
        info!(loaded, "Host save state changed");
    }

    pub fn is_save_loaded(&self) -> bool {
        self.save_loaded.load(Ordering::SeqCst)
    }

    fn ensure_save_loaded(&self) -> Result<(), HostError> {
        if self.is_save_loaded() {
            Ok(())
        } else {
            Err(HostError::Storage("no save file is loaded".to_string()))
        }
    }

    fn ensure_known(&self, skill: &SkillId) -> Result<(), HostError> {
        if self.catalog.skills.iter().any(|s| &s.id == skill) {
            Ok(())
        } else {
            Err(HostError::UnknownSkill(skill.clone()))
        }
    }

    /// Add experience to a skill, returning the new total
    pub async fn grant_experience(&self, skill: &SkillId, amount: i64) -> Result<i64, HostError> {
        self.ensure_known(skill)?;
        self.ensure_save_loaded()?;
        let mut player = self.player.write().await;
        let experience = player.experience.entry(skill.clone()).or_insert(0);
        *experience = experience.saturating_add(amount);
        Ok(*experience)
    }

    pub async fn learn_crafting_recipe(&self, name: impl Into<String>, times_crafted: i32) {
        self.player
            .write()
            .await
            .crafting_recipes
            .insert(name.into(), times_crafted);
    }

    pub async fn learn_cooking_recipe(&self, name: impl Into<String>, times_cooked: i32) {
        self.player
            .write()
            .await
            .cooking_recipes
            .insert(name.into(), times_cooked);
    }

    pub async fn professions(&self) -> BTreeSet<ProfessionId> {
        self.player.read().await.professions.clone()
    }

    pub async fn experience(&self, skill: &SkillId) -> i64 {
        self.player
            .read()
            .await
            .experience
            .get(skill)
            .copied()
            .unwrap_or(0)
    }
}

/// Remove every known recipe that `skill` unlocks, returning their counts
fn take_recipes(
    known: &mut HashMap<String, i32>,
    definitions: &[RecipeDefinition],
    skill: &SkillId,
) -> HashMap<String, i32> {
    definitions
        .iter()
        .filter(|recipe| recipe.unlocked_by(skill))
        .filter_map(|recipe| {
            known
                .remove(&recipe.name)
                .map(|count| (recipe.name.clone(), count))
        })
        .collect()
}

#[async_trait]
impl SkillCatalogPort for InMemoryHost {
    async fn all_skills(&self) -> Result<Vec<SkillDefinition>, HostError> {
        Ok(self.catalog.skills.clone())
    }
}

#[async_trait]
impl ExperienceStorePort for InMemoryHost {
    async fn get_experience(&self, skill: &SkillId) -> Result<i64, HostError> {
        self.ensure_known(skill)?;
        self.ensure_save_loaded()?;
        Ok(self.experience(skill).await)
    }

    async fn set_experience(&self, skill: &SkillId, experience: i64) -> Result<(), HostError> {
        self.ensure_known(skill)?;
        self.ensure_save_loaded()?;
        self.player
            .write()
            .await
            .experience
            .insert(skill.clone(), experience);
        Ok(())
    }
}

#[async_trait]
impl RecipeRemoverPort for InMemoryHost {
    async fn remove_crafting_recipes(&self, skill: &SkillId) -> Result<HashMap<String, i32>, HostError> {
        self.ensure_save_loaded()?;
        let mut player = self.player.write().await;
        let removed = take_recipes(&mut player.crafting_recipes, &self.catalog.crafting_recipes, skill);
        debug!(skill = %skill, count = removed.len(), "Removed crafting recipes");
        Ok(removed)
    }

    async fn remove_cooking_recipes(&self, skill: &SkillId) -> Result<HashMap<String, i32>, HostError> {
        self.ensure_save_loaded()?;
        let mut player = self.player.write().await;
        let removed = take_recipes(&mut player.cooking_recipes, &self.catalog.cooking_recipes, skill);
        debug!(skill = %skill, count = removed.len(), "Removed cooking recipes");
        Ok(removed)
    }
}

#[async_trait]
impl EffectApplierPort for InMemoryHost {
    async fn ensure_profession_effects_applied(&self) -> Result<(), HostError> {
        self.ensure_save_loaded()?;
        let purchased: Vec<ProfessionId> = self
            .ledger
            .all_records()
            .await
            .into_iter()
            .flat_map(|record| record.purchased_professions)
            .collect();

        let mut player = self.player.write().await;
        let before = player.professions.len();
        player.professions.extend(purchased);
        debug!(added = player.professions.len() - before, "Missing professions added");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PrestigeRecord;

    fn catalog() -> HostCatalog {
        let mut catalog = HostCatalog::builtin();
        catalog.crafting_recipes = vec![
            RecipeDefinition::new("Scarecrow", "Farming 1"),
            RecipeDefinition::new("Bee House", "Farming 3"),
            RecipeDefinition::new("Bomb", "Mining 6"),
        ];
        catalog.cooking_recipes = vec![RecipeDefinition::new("Farmer's Lunch", "Farming 3")];
        catalog
    }

    #[tokio::test]
    async fn test_remove_recipes_for_skill() {
        let host = InMemoryHost::new(catalog(), Arc::new(PrestigeLedger::default()));
        host.learn_crafting_recipe("Scarecrow", 4).await;
        host.learn_crafting_recipe("Bomb", 9).await;
        host.learn_cooking_recipe("Farmer's Lunch", 0).await;

        let farming = SkillId::from("Farming");
        let crafting = host.remove_crafting_recipes(&farming).await.unwrap();
        let cooking = host.remove_cooking_recipes(&farming).await.unwrap();

        // Bee House was never learned, Bomb belongs to Mining
        assert_eq!(crafting, HashMap::from([("Scarecrow".to_string(), 4)]));
        assert_eq!(cooking, HashMap::from([("Farmer's Lunch".to_string(), 0)]));

        let again = host.remove_crafting_recipes(&farming).await.unwrap();
        assert!(again.is_empty());
        let mining = host.remove_crafting_recipes(&SkillId::from("Mining")).await.unwrap();
        assert_eq!(mining.len(), 1);
    }

    #[tokio::test]
    async fn test_experience_for_unknown_skill() {
        let host = InMemoryHost::new(catalog(), Arc::new(PrestigeLedger::default()));
        let luck = SkillId::from("Luck");

        assert!(matches!(
            host.get_experience(&luck).await,
            Err(HostError::UnknownSkill(_))
        ));
        assert!(host.grant_experience(&luck, 100).await.is_err());
    }

    #[tokio::test]
    async fn test_experience_round_trip() {
        let host = InMemoryHost::new(catalog(), Arc::new(PrestigeLedger::default()));
        let mining = SkillId::from("Mining");

        assert_eq!(host.grant_experience(&mining, 12000).await.unwrap(), 12000);
        host.set_experience(&mining, 500).await.unwrap();
        assert_eq!(host.get_experience(&mining).await.unwrap(), 500);
    }

    #[tokio::test]
    async fn test_effects_grant_purchased_professions() {
        let mut farming = PrestigeRecord::new(SkillId::from("Farming"));
        farming.purchased_professions.insert(ProfessionId::new(1));
        let mut combat = PrestigeRecord::new(SkillId::from("Combat"));
        combat.purchased_professions.insert(ProfessionId::new(29));
        let ledger = Arc::new(PrestigeLedger::from_records(vec![farming, combat]));
        let host = InMemoryHost::new(catalog(), ledger);

        host.ensure_profession_effects_applied().await.unwrap();
        host.ensure_profession_effects_applied().await.unwrap();

        let professions = host.professions().await;
        assert_eq!(
            professions,
            BTreeSet::from([ProfessionId::new(1), ProfessionId::new(29)])
        );
    }

    #[tokio::test]
    async fn test_player_operations_fail_without_save() {
        let host = InMemoryHost::new(catalog(), Arc::new(PrestigeLedger::default()));
        let farming = SkillId::from("Farming");
        host.grant_experience(&farming, 300).await.unwrap();

        host.set_save_loaded(false);
        assert!(matches!(
            host.get_experience(&farming).await,
            Err(HostError::Storage(_))
        ));
        assert!(host.remove_cooking_recipes(&farming).await.is_err());
        assert!(host.ensure_profession_effects_applied().await.is_err());
        let catalog = host.all_skills().await.unwrap();
        assert_eq!(catalog.len(), 5);

        host.set_save_loaded(true);
        assert_eq!(host.get_experience(&farming).await.unwrap(), 300);
    }
}
