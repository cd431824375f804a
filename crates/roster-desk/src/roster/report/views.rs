use super::super::domain::{AthleteId, Gender, Tier};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TierDistributionEntry {
    pub gender: Gender,
    pub gender_label: &'static str,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetView {
    pub gender: Gender,
    pub gender_label: &'static str,
    pub total_budget: f64,
    pub allocated: f64,
    pub remaining: f64,
    /// Absent when the pool is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization_pct: Option<f64>,
    pub over_allocated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub athlete_id: AthleteId,
    pub name: String,
    pub event: String,
    pub gender: Gender,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub impact_total: i32,
    pub display_percent: u8,
    pub recommended_amount: f64,
    pub current_amount: f64,
}
