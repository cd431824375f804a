use serde::{Deserialize, Serialize};

use super::super::domain::Tier;

/// Multiplier applied to the raw impact points for each tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTable {
    pub elite: f64,
    pub competitive: f64,
    pub developing: f64,
    pub prospect: f64,
    /// Applied to projection labels that name no tier.
    #[serde(default = "MultiplierTable::default_fallback")]
    pub fallback: f64,
}

impl MultiplierTable {
    /// Used when the coach has projected a potential tier.
    pub const POTENTIAL: Self = Self {
        elite: 1.5,
        competitive: 1.2,
        developing: 1.0,
        prospect: 0.8,
        fallback: 1.0,
    };

    /// Used when only the athlete's current tier is known.
    pub const CURRENT: Self = Self {
        elite: 1.3,
        competitive: 1.1,
        developing: 0.9,
        prospect: 0.7,
        fallback: 1.0,
    };

    const fn default_fallback() -> f64 {
        1.0
    }

    pub const fn for_tier(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Elite => self.elite,
            Tier::Competitive => self.competitive,
            Tier::Developing => self.developing,
            Tier::Prospect => self.prospect,
        }
    }
}

/// Weighting rubric for impact scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactConfig {
    pub potential: MultiplierTable,
    pub current: MultiplierTable,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            potential: MultiplierTable::POTENTIAL,
            current: MultiplierTable::CURRENT,
        }
    }
}
