//! Profession tiers

use serde::{Deserialize, Serialize};

/// Tier of a profession, i.e. the skill level at which the host normally
/// offers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfessionTier {
    /// Chosen at skill level 5
    One,
    /// Chosen at skill level 10
    Two,
}

impl ProfessionTier {
    pub fn number(self) -> u8 {
        match self {
            ProfessionTier::One => 1,
            ProfessionTier::Two => 2,
        }
    }
}

impl TryFrom<u8> for ProfessionTier {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(ProfessionTier::One),
            2 => Ok(ProfessionTier::Two),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for ProfessionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_raw() {
        assert_eq!(ProfessionTier::try_from(1), Ok(ProfessionTier::One));
        assert_eq!(ProfessionTier::try_from(2), Ok(ProfessionTier::Two));
        assert_eq!(ProfessionTier::try_from(3), Err(3));
        assert_eq!(ProfessionTier::try_from(0), Err(0));
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(ProfessionTier::One.to_string(), "tier 1");
        assert_eq!(ProfessionTier::Two.number(), 2);
    }
}
