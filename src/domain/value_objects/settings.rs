//! Prestige cost settings value object
//!
//! The schedule is stored in SQLite as key-value pairs and transmitted over
//! the settings API, so the serde shape is part of the API contract.

use serde::{Deserialize, Serialize};

use super::ProfessionTier;

/// Exchange rates of the prestige economy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostSchedule {
    /// Points required to purchase a tier 1 profession
    pub tier_one_cost: u32,
    /// Points required to purchase a tier 2 profession
    pub tier_two_cost: u32,
    /// Points minted by each skill reset
    pub points_per_reset: u32,
    /// Experience removed from the skill by each reset
    pub experience_cost_per_reset: u32,
}

impl Default for CostSchedule {
    fn default() -> Self {
        Self {
            tier_one_cost: 1,
            tier_two_cost: 2,
            points_per_reset: 1,
            experience_cost_per_reset: 15000,
        }
    }
}

impl CostSchedule {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tier_one_cost: env_or("PRESTIGE_TIER_ONE_COST", defaults.tier_one_cost),
            tier_two_cost: env_or("PRESTIGE_TIER_TWO_COST", defaults.tier_two_cost),
            points_per_reset: env_or("PRESTIGE_POINTS_PER_RESET", defaults.points_per_reset),
            experience_cost_per_reset: env_or("PRESTIGE_EXPERIENCE_PER_RESET", defaults.experience_cost_per_reset),
        }
    }

    pub fn cost_for(&self, tier: ProfessionTier) -> u32 {
        match tier {
            ProfessionTier::One => self.tier_one_cost,
            ProfessionTier::Two => self.tier_two_cost,
        }
    }

    /// Reject schedules that would make professions free or resets worthless
    pub fn validate(&self) -> Result<(), ScheduleViolation> {
        if self.tier_one_cost == 0 {
            return Err(ScheduleViolation::FreeProfessions(ProfessionTier::One));
        }
        if self.tier_two_cost == 0 {
            return Err(ScheduleViolation::FreeProfessions(ProfessionTier::Two));
        }
        if self.points_per_reset == 0 {
            return Err(ScheduleViolation::WorthlessReset);
        }
        Ok(())
    }
}

/// A rule of the prestige economy broken by a cost schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleViolation {
    #[error("{0} professions must cost at least one point")]
    FreeProfessions(ProfessionTier),
    #[error("a reset must mint at least one point")]
    WorthlessReset,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
