//! Profession index - Which skill owns which profession
//!
//! Built once from the host catalog so that resolving a profession is a
//! single map lookup. A profession listed under several skills is kept as
//! ambiguous and never resolves.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::SkillDefinition;
use crate::domain::value_objects::{ProfessionId, SkillId};

/// The unique owner of a profession and the raw tier it was listed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionOwner {
    pub skill: SkillId,
    pub tier: u8,
}

/// Why a profession could not be resolved to exactly one skill
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupFailure {
    #[error("no skill offers profession {0}")]
    NotFound(ProfessionId),
    #[error("profession {profession} is claimed by several skills: {owners}", owners = format_skills(.skills))]
    Ambiguous {
        profession: ProfessionId,
        skills: Vec<SkillId>,
    },
}

fn format_skills(skills: &[SkillId]) -> String {
    skills
        .iter()
        .map(SkillId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Default)]
pub struct ProfessionIndex {
    owners: HashMap<ProfessionId, Vec<ProfessionOwner>>,
    skills: HashSet<SkillId>,
}

impl ProfessionIndex {
    pub fn build(catalog: &[SkillDefinition]) -> Self {
        let mut index = Self::default();
        for skill in catalog {
            index.skills.insert(skill.id.clone());
            for profession in &skill.professions {
                let owners = index.owners.entry(profession.id).or_default();
                // A skill listing the same profession twice still owns it once
                if !owners.iter().any(|owner| owner.skill == skill.id) {
                    owners.push(ProfessionOwner {
                        skill: skill.id.clone(),
                        tier: profession.tier,
                    });
                }
            }
        }
        index
    }

    pub fn resolve(&self, profession: ProfessionId) -> Result<&ProfessionOwner, LookupFailure> {
        match self.owners.get(&profession).map(Vec::as_slice) {
            Some([owner]) => Ok(owner),
            Some(owners) if owners.len() > 1 => Err(LookupFailure::Ambiguous {
                profession,
                skills: owners.iter().map(|owner| owner.skill.clone()).collect(),
            }),
            _ => Err(LookupFailure::NotFound(profession)),
        }
    }

    pub fn contains_skill(&self, skill: &SkillId) -> bool {
        self.skills.contains(skill)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillId> {
        self.skills.iter()
    }

    /// Professions that resolve to more than one skill
    pub fn ambiguous_professions(&self) -> Vec<ProfessionId> {
        let mut ambiguous: Vec<ProfessionId> = self
            .owners
            .iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(id, _)| *id)
            .collect();
        ambiguous.sort();
        ambiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProfessionDefinition;

    fn catalog() -> Vec<SkillDefinition> {
        vec![
            SkillDefinition::new("Farming")
                .with_profession(ProfessionDefinition::new(0, "Rancher", 1))
                .with_profession(ProfessionDefinition::new(4, "Artisan", 2)),
            SkillDefinition::new("Fishing")
                .with_profession(ProfessionDefinition::new(6, "Fisher", 1))
                .with_profession(ProfessionDefinition::new(4, "Artisan", 2)),
        ]
    }

    #[test]
    fn test_resolve_unique_owner() {
        let index = ProfessionIndex::build(&catalog());
        let owner = index.resolve(ProfessionId::new(6)).unwrap();
        assert_eq!(owner.skill, SkillId::from("Fishing"));
        assert_eq!(owner.tier, 1);
    }

    #[test]
    fn test_resolve_missing_and_ambiguous() {
        let index = ProfessionIndex::build(&catalog());

        assert_eq!(
            index.resolve(ProfessionId::new(99)),
            Err(LookupFailure::NotFound(ProfessionId::new(99)))
        );

        match index.resolve(ProfessionId::new(4)) {
            Err(LookupFailure::Ambiguous { skills, .. }) => assert_eq!(skills.len(), 2),
            other => panic!("Expected Ambiguous, got {:?}", other),
        }
        assert_eq!(index.ambiguous_professions(), vec![ProfessionId::new(4)]);
    }

    #[test]
    fn test_duplicate_listing_within_one_skill() {
        let catalog = vec![SkillDefinition::new("Mining")
            .with_profession(ProfessionDefinition::new(18, "Miner", 1))
            .with_profession(ProfessionDefinition::new(18, "Miner", 1))];
        let index = ProfessionIndex::build(&catalog);

        assert!(index.resolve(ProfessionId::new(18)).is_ok());
        assert!(index.contains_skill(&SkillId::from("Mining")));
        assert!(!index.contains_skill(&SkillId::from("Luck")));
    }
}
