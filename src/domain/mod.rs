//! Domain layer - Core prestige rules with no infrastructure dependencies
//!
//! This layer contains:
//! - Entities: PrestigeRecord, SkillDefinition
//! - Value Objects: identifiers, profession tiers, the cost schedule
//! - Aggregates: the PrestigeLedger
//! - Domain Services: the profession index

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
