//! Domain entities

mod prestige_record;
mod skill;

pub use prestige_record::{PrestigeRecord, SpendRejection};
pub use skill::{ProfessionDefinition, SkillDefinition};
