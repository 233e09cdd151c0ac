//! Host catalog - Skills, professions and skill-granted recipes
//!
//! Loaded from a TOML/JSON/YAML file through the `config` crate, or the
//! built-in five skills when no file is configured. No recipes are built in.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::entities::{ProfessionDefinition, SkillDefinition};
use crate::domain::value_objects::SkillId;

/// A recipe the player learns by leveling a skill
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipeDefinition {
    pub name: String,
    /// Host unlock condition, e.g. `"Farming 3"`
    pub unlock_condition: String,
}

impl RecipeDefinition {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, unlock_condition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unlock_condition: unlock_condition.into(),
        }
    }

    /// Whether leveling `skill` grants this recipe
    pub fn unlocked_by(&self, skill: &SkillId) -> bool {
        self.unlock_condition
            .split_whitespace()
            .any(|word| word == skill.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostCatalog {
    pub skills: Vec<SkillDefinition>,
    #[serde(default)]
    pub crafting_recipes: Vec<RecipeDefinition>,
    #[serde(default)]
    pub cooking_recipes: Vec<RecipeDefinition>,
}

impl HostCatalog {
    pub fn from_file(path: &Path) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|raw| raw.try_deserialize())
            .with_context(|| format!("Failed to load skill catalog from {}", path.display()))
    }

    /// Load `path` if given, otherwise the built-in catalog
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// The five vanilla skills: two tier 1 and four tier 2 professions each
    pub fn builtin() -> Self {
        let skill = |name: &str, first_id: i32, professions: [&str; 6]| {
            professions
                .iter()
                .enumerate()
                .fold(SkillDefinition::new(name), |skill, (offset, profession)| {
                    let tier = if offset < 2 { 1 } else { 2 };
                    skill.with_profession(ProfessionDefinition::new(
                        first_id + offset as i32,
                        *profession,
                        tier,
                    ))
                })
        };

        Self {
            skills: vec![
                skill("Farming", 0, ["Rancher", "Tiller", "Coopmaster", "Shepherd", "Artisan", "Agriculturist"]),
                skill("Fishing", 6, ["Fisher", "Trapper", "Angler", "Pirate", "Mariner", "Luremaster"]),
                skill("Foraging", 12, ["Forester", "Gatherer", "Lumberjack", "Tapper", "Botanist", "Tracker"]),
                skill("Mining", 18, ["Miner", "Geologist", "Blacksmith", "Prospector", "Excavator", "Gemologist"]),
                skill("Combat", 24, ["Fighter", "Scout", "Brute", "Defender", "Acrobat", "Desperado"]),
            ],
            crafting_recipes: Vec::new(),
            cooking_recipes: Vec::new(),
        }
    }
}
