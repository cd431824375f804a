use super::super::budget::aggregate;
use super::super::config::ScoringConfig;
use super::super::domain::{Athlete, Gender, Tier};
use super::super::impact::ImpactScorer;
use super::super::scholarship::recommend_amount;
use super::views::{BudgetView, LeaderboardEntry, TierDistributionEntry};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct RosterReport {
    pub generated_on: NaiveDate,
    pub active_athletes: usize,
    pub archived_athletes: usize,
    pub tier_distribution: Vec<TierDistributionEntry>,
    pub budgets: Vec<BudgetView>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Summarize a roster snapshot. Archived athletes only show up in `archived_athletes`.
pub fn build_report(
    athletes: &[Athlete],
    config: &ScoringConfig,
    scorer: &ImpactScorer,
    generated_on: NaiveDate,
) -> RosterReport {
    let (archived, active): (Vec<&Athlete>, Vec<&Athlete>) =
        athletes.iter().partition(|athlete| athlete.is_archived());

    let mut counts: HashMap<(Gender, Tier), usize> = HashMap::new();
    for athlete in &active {
        *counts
            .entry((athlete.gender, athlete.tier.current()))
            .or_default() += 1;
    }

    let tier_distribution = Gender::ordered()
        .into_iter()
        .flat_map(|gender| {
            Tier::by_priority()
                .into_iter()
                .map(move |tier| (gender, tier))
        })
        .map(|(gender, tier)| TierDistributionEntry {
            gender,
            gender_label: gender.label(),
            tier,
            tier_label: tier.label(),
            count: counts.get(&(gender, tier)).copied().unwrap_or(0),
        })
        .collect();

    let budgets = Gender::ordered()
        .into_iter()
        .map(|gender| {
            let budget = aggregate(athletes, gender, &config.budgets);
            BudgetView {
                gender,
                gender_label: gender.label(),
                total_budget: budget.total_budget,
                allocated: budget.allocated,
                remaining: budget.remaining,
                utilization_pct: budget.utilization_percent().ok(),
                over_allocated: budget.is_over_allocated(),
            }
        })
        .collect();

    let mut leaderboard: Vec<LeaderboardEntry> = active
        .iter()
        .filter(|athlete| athlete.evaluation.is_some())
        .map(|athlete| {
            let tier = athlete.tier.current();
            let impact = scorer.score(athlete.evaluation.as_ref(), tier);
            LeaderboardEntry {
                athlete_id: athlete.id.clone(),
                name: athlete.name.clone(),
                event: athlete.event.clone(),
                gender: athlete.gender,
                tier,
                tier_label: tier.label(),
                impact_total: impact.total,
                display_percent: impact.display_percent(),
                recommended_amount: recommend_amount(impact.total, config.max_scholarship),
                current_amount: athlete.scholarship_amount,
            }
        })
        .collect();
    leaderboard.sort_by(|a, b| {
        b.impact_total
            .cmp(&a.impact_total)
            .then_with(|| a.name.cmp(&b.name))
    });

    RosterReport {
        generated_on,
        active_athletes: active.len(),
        archived_athletes: archived.len(),
        tier_distribution,
        budgets,
        leaderboard,
    }
}
