//! Scholarship recommendations and percentage/dollar conversions.

/// Baseline full scholarship used when no other maximum is configured.
pub const DEFAULT_MAX_SCHOLARSHIP: f64 = 10_000.0;

/// Error raised by scholarship conversions.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScholarshipError {
    #[error("budget must be a positive amount (got {budget})")]
    InvalidBudget { budget: f64 },
}

/// Recommended award for an impact total, rounded to the nearest 100.
///
/// Totals above 100 are not capped, so the award can exceed `max_scholarship`.
pub fn recommend_amount(impact_total: i32, max_scholarship: f64) -> f64 {
    let raw = f64::from(impact_total) / 100.0 * max_scholarship;
    (raw / 100.0).round() * 100.0
}

pub fn percentage_to_dollars(percentage: f64, budget: f64) -> f64 {
    percentage / 100.0 * budget
}

pub fn dollars_to_percentage(amount: f64, budget: f64) -> Result<f64, ScholarshipError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(ScholarshipError::InvalidBudget { budget });
    }
    Ok(amount / budget * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_rounds_to_nearest_hundred() {
        assert_eq!(recommend_amount(0, DEFAULT_MAX_SCHOLARSHIP), 0.0);
        assert_eq!(recommend_amount(73, DEFAULT_MAX_SCHOLARSHIP), 7_300.0);
        assert_eq!(recommend_amount(101, 12_345.0), 12_500.0);
        assert_eq!(recommend_amount(42, 9_000.0), 3_800.0);
    }

    #[test]
    fn recommendation_can_exceed_maximum() {
        assert_eq!(recommend_amount(180, DEFAULT_MAX_SCHOLARSHIP), 18_000.0);
    }

    #[test]
    fn conversions_round_trip() {
        let percentage = dollars_to_percentage(500.0, 10_000.0).expect("valid budget");
        assert!((percentage - 5.0).abs() < 1e-9);
        let dollars = percentage_to_dollars(percentage, 10_000.0);
        assert!((dollars - 500.0).abs() < 1e-9);
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert_eq!(
            dollars_to_percentage(500.0, 0.0),
            Err(ScholarshipError::InvalidBudget { budget: 0.0 })
        );
        assert!(dollars_to_percentage(500.0, -10.0).is_err());
        assert!(dollars_to_percentage(500.0, f64::NAN).is_err());
        assert_eq!(percentage_to_dollars(25.0, 0.0), 0.0);
    }
}
