//! Prestige record entity - The point balance and purchases of one skill

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProfessionId, SkillId};

/// Prestige state of a single skill
///
/// Records handed out by the ledger are snapshots; the mutating methods are
/// crate-private so only the prestige transactions can change live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrestigeRecord {
    pub skill: SkillId,
    /// Spendable prestige points
    pub points: u32,
    /// Professions made permanent with prestige points
    #[serde(default)]
    pub purchased_professions: BTreeSet<ProfessionId>,
    /// Crafting recipes (name -> times crafted) removed by the last reset
    #[serde(default)]
    pub saved_crafting_recipe_counts: HashMap<String, i32>,
    /// Cooking recipes (name -> times cooked) removed by the last reset
    #[serde(default)]
    pub saved_cooking_recipe_counts: HashMap<String, i32>,
}

/// Why a purchase could not be charged against a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendRejection {
    AlreadyPurchased,
    InsufficientPoints { available: u32 },
}

impl PrestigeRecord {
    pub fn new(skill: SkillId) -> Self {
        Self {
            skill,
            points: 0,
            purchased_professions: BTreeSet::new(),
            saved_crafting_recipe_counts: HashMap::new(),
            saved_cooking_recipe_counts: HashMap::new(),
        }
    }

    pub fn has_purchased(&self, profession: ProfessionId) -> bool {
        self.purchased_professions.contains(&profession)
    }

    /// Charge `cost` points and record the profession in one step
    ///
    /// Nothing changes unless both the deduction and the insertion happen.
    /// Returns the remaining balance.
    pub(crate) fn spend(
        &mut self,
        profession: ProfessionId,
        cost: u32,
    ) -> Result<u32, SpendRejection> {
        if self.has_purchased(profession) {
            return Err(SpendRejection::AlreadyPurchased);
        }

        let remaining = self
            .points
            .checked_sub(cost)
            .ok_or(SpendRejection::InsufficientPoints {
                available: self.points,
            })?;

        self.points = remaining;
        self.purchased_professions.insert(profession);
        Ok(remaining)
    }

    /// Add freshly minted points, returning the new balance
    pub(crate) fn mint(&mut self, points: u32) -> u32 {
        self.points = self.points.saturating_add(points);
        self.points
    }

    pub(crate) fn save_crafting_recipes(&mut self, counts: HashMap<String, i32>) {
        self.saved_crafting_recipe_counts = counts;
    }

    pub(crate) fn save_cooking_recipes(&mut self, counts: HashMap<String, i32>) {
        self.saved_cooking_recipe_counts = counts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_commits_points_and_profession_together() {
        let mut record = PrestigeRecord::new(SkillId::from("Farming"));
        record.points = 3;

        let remaining = record.spend(ProfessionId::new(1), 2).unwrap();

        assert_eq!(remaining, 1);
        assert_eq!(record.points, 1);
        assert!(record.has_purchased(ProfessionId::new(1)));
    }

    #[test]
    fn test_spend_rejects_without_mutation() {
        let mut record = PrestigeRecord::new(SkillId::from("Farming"));
        record.points = 1;

        let rejection = record.spend(ProfessionId::new(4), 2).unwrap_err();
        assert_eq!(rejection, SpendRejection::InsufficientPoints { available: 1 });
        assert_eq!(record.points, 1);
        assert!(record.purchased_professions.is_empty());

        record.spend(ProfessionId::new(0), 1).unwrap();
        record.points = 5;
        let rejection = record.spend(ProfessionId::new(0), 1).unwrap_err();
        assert_eq!(rejection, SpendRejection::AlreadyPurchased);
        assert_eq!(record.points, 5);
        assert_eq!(record.purchased_professions.len(), 1);
    }

    #[test]
    fn test_mint_saturates() {
        let mut record = PrestigeRecord::new(SkillId::from("Mining"));
        record.points = u32::MAX - 1;
        assert_eq!(record.mint(5), u32::MAX);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut record = PrestigeRecord::new(SkillId::from("Fishing"));
        record.points = 4;
        record.purchased_professions.insert(ProfessionId::new(9));
        record.purchased_professions.insert(ProfessionId::new(6));
        record
            .saved_crafting_recipe_counts
            .insert("Crab Pot".to_string(), 3);
        record
            .saved_cooking_recipe_counts
            .insert("Fish Taco".to_string(), 1);

        let json = serde_json::to_string(&record).unwrap();
        let restored: PrestigeRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, record);
    }

    #[test]
    fn test_deserialize_fills_missing_collections() {
        let json = r#"{"skill":"Combat","points":2,"purchased_professions":[26,24,26]}"#;
        let record: PrestigeRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.skill, SkillId::from("Combat"));
        assert_eq!(record.points, 2);
        assert_eq!(record.purchased_professions.len(), 2);
        assert!(record.saved_crafting_recipe_counts.is_empty());
        assert!(record.saved_cooking_recipe_counts.is_empty());
    }
}
