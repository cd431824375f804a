use serde::{Deserialize, Serialize};

use super::domain::{Athlete, Gender};
use super::scholarship::{dollars_to_percentage, ScholarshipError};

/// Scholarship pools available to each team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub men: f64,
    pub women: f64,
}

impl BudgetConfig {
    pub const fn total_for(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Men => self.men,
            Gender::Women => self.women,
        }
    }
}

/// Allocation snapshot for one gender.
///
/// `remaining` is allowed to go negative; that signals over-allocation to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipBudget {
    pub gender: Gender,
    pub total_budget: f64,
    pub allocated: f64,
    pub remaining: f64,
}

impl ScholarshipBudget {
    pub fn is_over_allocated(&self) -> bool {
        self.allocated > self.total_budget
    }

    pub fn utilization_percent(&self) -> Result<f64, ScholarshipError> {
        dollars_to_percentage(self.allocated, self.total_budget)
    }
}

/// Sum scholarship allocations for non-archived athletes of one gender.
pub fn aggregate(athletes: &[Athlete], gender: Gender, budgets: &BudgetConfig) -> ScholarshipBudget {
    let allocated = athletes
        .iter()
        .filter(|athlete| athlete.gender == gender && !athlete.is_archived())
        .map(|athlete| athlete.scholarship_amount)
        .sum::<f64>();
    let total_budget = budgets.total_for(gender);

    ScholarshipBudget {
        gender,
        total_budget,
        allocated,
        remaining: total_budget - allocated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::{AthleteId, AthleteStatus, TierAssignment};

    fn athlete(id: &str, gender: Gender, amount: f64, status: AthleteStatus) -> Athlete {
        Athlete {
            id: AthleteId(id.to_string()),
            name: format!("Athlete {id}"),
            event: "400m".to_string(),
            personal_best: "49.10".to_string(),
            gender,
            status,
            tier: TierAssignment::default(),
            scholarship_amount: amount,
            evaluation: None,
        }
    }

    fn budgets() -> BudgetConfig {
        BudgetConfig {
            men: 20_000.0,
            women: 25_000.0,
        }
    }

    fn roster() -> Vec<Athlete> {
        vec![
            athlete("m1", Gender::Men, 6_000.0, AthleteStatus::Active),
            athlete("m2", Gender::Men, 4_500.0, AthleteStatus::Injured),
            athlete("m3", Gender::Men, 9_000.0, AthleteStatus::Archived),
            athlete("w1", Gender::Women, 8_000.0, AthleteStatus::Redshirt),
        ]
    }

    #[test]
    fn archived_athletes_are_excluded() {
        let budget = aggregate(&roster(), Gender::Men, &budgets());
        assert_eq!(budget.allocated, 10_500.0);
        assert_eq!(budget.remaining, 9_500.0);
        assert_eq!(budget.total_budget, 20_000.0);
    }

    #[test]
    fn removing_an_active_athlete_reduces_allocation_exactly() {
        let full = aggregate(&roster(), Gender::Men, &budgets());
        let trimmed: Vec<Athlete> = roster()
            .into_iter()
            .filter(|athlete| athlete.id.0 != "m1")
            .collect();
        let reduced = aggregate(&trimmed, Gender::Men, &budgets());
        assert_eq!(full.allocated - reduced.allocated, 6_000.0);
    }

    #[test]
    fn genders_are_scoped_separately() {
        let budget = aggregate(&roster(), Gender::Women, &budgets());
        assert_eq!(budget.allocated, 8_000.0);
        assert_eq!(budget.remaining, 17_000.0);
        assert!((budget.utilization_percent().expect("positive budget") - 32.0).abs() < 1e-9);
    }

    #[test]
    fn over_allocation_goes_negative() {
        let tight = BudgetConfig {
            men: 10_000.0,
            women: 0.0,
        };
        let budget = aggregate(&roster(), Gender::Men, &tight);
        assert_eq!(budget.remaining, -500.0);
        assert!(budget.is_over_allocated());

        let empty = aggregate(&roster(), Gender::Women, &tight);
        assert!(empty.utilization_percent().is_err());
    }
}
