//! Skill definitions as reported by the host catalog

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProfessionId, SkillId};

/// A profession offered by a skill
///
/// `tier` is kept raw; an unexpected value is a catalog inconsistency that
/// surfaces when the profession is purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionDefinition {
    pub id: ProfessionId,
    #[serde(default)]
    pub name: String,
    pub tier: u8,
}

impl ProfessionDefinition {
    pub fn new(id: i32, name: impl Into<String>, tier: u8) -> Self {
        Self {
            id: ProfessionId::new(id),
            name: name.into(),
            tier,
        }
    }
}

/// A skill and the professions it offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: SkillId,
    #[serde(default)]
    pub professions: Vec<ProfessionDefinition>,
}

impl SkillDefinition {
    pub fn new(id: impl Into<SkillId>) -> Self {
        Self {
            id: id.into(),
            professions: Vec::new(),
        }
    }

    pub fn with_profession(mut self, profession: ProfessionDefinition) -> Self {
        self.professions.push(profession);
        self
    }
}
