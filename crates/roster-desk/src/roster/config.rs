use serde::{Deserialize, Serialize};

use super::budget::BudgetConfig;
use super::classification::TierThresholdTable;
use super::impact::ImpactConfig;
use super::scholarship::DEFAULT_MAX_SCHOLARSHIP;

/// Reference data injected into the roster service at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub thresholds: TierThresholdTable,
    pub impact: ImpactConfig,
    pub max_scholarship: f64,
    pub budgets: BudgetConfig,
}

impl ScoringConfig {
    pub fn standard(budgets: BudgetConfig) -> Self {
        Self {
            thresholds: TierThresholdTable::standard(),
            impact: ImpactConfig::default(),
            max_scholarship: DEFAULT_MAX_SCHOLARSHIP,
            budgets,
        }
    }
}
