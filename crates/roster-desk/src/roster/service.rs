use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::budget::{aggregate, ScholarshipBudget};
use super::classification::{classify_listed, TierThresholdTable};
use super::config::ScoringConfig;
use super::domain::{
    Athlete, AthleteId, AthleteStatus, Evaluation, Gender, Tier, TierAssignment,
};
use super::impact::{ImpactScore, ImpactScorer};
use super::report::{build_report, RosterReport};
use super::repository::{
    AlertError, AlertPublisher, AthleteRepository, BudgetAlert, RepositoryError,
};
use super::scholarship::recommend_amount;

/// Re-run auto-classification unless a coach has pinned the tier.
///
/// Returns `true` when the stored assignment changed.
pub fn reclassify(athlete: &mut Athlete, thresholds: &TierThresholdTable) -> bool {
    let TierAssignment::Auto(previous) = athlete.tier else {
        return false;
    };
    let tier = classify_listed(
        &athlete.event,
        &athlete.personal_best,
        athlete.gender,
        thresholds,
    );
    athlete.tier = TierAssignment::Auto(tier);
    tier != previous
}

/// Intake payload for a new roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAthlete {
    #[serde(default)]
    pub id: Option<AthleteId>,
    pub name: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub personal_best: String,
    pub gender: Gender,
    #[serde(default)]
    pub status: AthleteStatus,
    #[serde(default)]
    pub scholarship_amount: f64,
    /// Pins the tier instead of auto-classifying.
    #[serde(default)]
    pub tier_override: Option<Tier>,
}

/// Impact score plus the award it suggests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub athlete_id: AthleteId,
    pub tier: Tier,
    pub manual_tier: bool,
    pub impact: ImpactScore,
    pub recommended_amount: f64,
    pub current_amount: f64,
}

/// Service composing classification, impact scoring, and the budget ledger over a repository.
pub struct RosterService<R, A> {
    repository: Arc<R>,
    alerts: Arc<A>,
    config: Arc<ScoringConfig>,
    scorer: ImpactScorer,
    sequence: AtomicU64,
    /// Held across every fetch, edit, write-back cycle so concurrent edits to the same
    /// record cannot drop each other's changes.
    writes: Mutex<()>,
}

impl<R, A> RosterService<R, A>
where
    R: AthleteRepository + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>, config: ScoringConfig) -> Self {
        let scorer = ImpactScorer::new(config.impact.clone());
        Self {
            repository,
            alerts,
            config: Arc::new(config),
            scorer,
            sequence: AtomicU64::new(1),
            writes: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn scorer(&self) -> &ImpactScorer {
        &self.scorer
    }

    /// Next generated id not already taken by a seeded or hand-keyed record.
    fn next_athlete_id(&self) -> Result<AthleteId, RosterServiceError> {
        loop {
            let id = self.sequence.fetch_add(1, Ordering::Relaxed);
            let candidate = AthleteId(format!("ath-{id:04}"));
            if self.repository.fetch(&candidate)?.is_none() {
                return Ok(candidate);
            }
        }
    }

    fn load(&self, id: &AthleteId) -> Result<Athlete, RosterServiceError> {
        let athlete = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(athlete)
    }

    /// Load, edit, and store one athlete while holding the write lock.
    fn modify<F>(&self, id: &AthleteId, edit: F) -> Result<Athlete, RosterServiceError>
    where
        F: FnOnce(&mut Athlete),
    {
        let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        let mut athlete = self.load(id)?;
        edit(&mut athlete);
        self.repository.update(athlete.clone())?;
        Ok(athlete)
    }

    /// Add an athlete, auto-classifying unless a tier override is supplied.
    pub fn enroll(&self, intake: NewAthlete) -> Result<Athlete, RosterServiceError> {
        validate_amount(intake.scholarship_amount)?;

        let id = match intake.id {
            Some(id) => id,
            None => self.next_athlete_id()?,
        };
        let mut athlete = Athlete {
            id,
            name: intake.name,
            event: intake.event,
            personal_best: intake.personal_best,
            gender: intake.gender,
            status: intake.status,
            tier: TierAssignment::default(),
            scholarship_amount: intake.scholarship_amount,
            evaluation: None,
        };

        match intake.tier_override {
            Some(tier) => athlete.tier = TierAssignment::ManualOverride(tier),
            None => {
                reclassify(&mut athlete, &self.config.thresholds);
            }
        }

        let stored = {
            let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
            self.repository.insert(athlete)?
        };
        info!(athlete = %stored.id, tier = stored.tier.current().label(), "athlete enrolled");
        self.check_budget(&stored)?;
        Ok(stored)
    }

    /// Bulk-load athletes that were classified elsewhere (for example a CSV import).
    pub fn seed(&self, athletes: Vec<Athlete>) -> Result<usize, RosterServiceError> {
        let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        let mut inserted = 0;
        for athlete in athletes {
            self.repository.insert(athlete)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Record a new mark (and optionally event). Auto tiers follow the new result.
    pub fn update_result(
        &self,
        id: &AthleteId,
        personal_best: String,
        event: Option<String>,
    ) -> Result<Athlete, RosterServiceError> {
        let thresholds = &self.config.thresholds;
        self.modify(id, |athlete| {
            athlete.personal_best = personal_best;
            if let Some(event) = event {
                athlete.event = event;
            }

            if reclassify(athlete, thresholds) {
                info!(athlete = %athlete.id, tier = athlete.tier.current().label(), "tier reclassified");
            }
        })
    }

    pub fn override_tier(&self, id: &AthleteId, tier: Tier) -> Result<Athlete, RosterServiceError> {
        self.modify(id, |athlete| {
            athlete.tier = TierAssignment::ManualOverride(tier);
        })
    }

    /// Drop a manual override and classify from the current mark.
    pub fn reset_tier(&self, id: &AthleteId) -> Result<Athlete, RosterServiceError> {
        let thresholds = &self.config.thresholds;
        self.modify(id, |athlete| {
            athlete.tier = TierAssignment::Auto(athlete.tier.current());
            reclassify(athlete, thresholds);
        })
    }

    pub fn record_evaluation(
        &self,
        id: &AthleteId,
        evaluation: Evaluation,
    ) -> Result<Scorecard, RosterServiceError> {
        let athlete = self.modify(id, |athlete| {
            athlete.evaluation = Some(evaluation);
        })?;
        Ok(self.scorecard_for(&athlete))
    }

    pub fn set_scholarship(
        &self,
        id: &AthleteId,
        amount: f64,
    ) -> Result<ScholarshipBudget, RosterServiceError> {
        validate_amount(amount)?;
        let athlete = self.modify(id, |athlete| {
            athlete.scholarship_amount = amount;
        })?;
        self.check_budget(&athlete)
    }

    /// Soft delete: the athlete leaves budget sums but keeps their award on record.
    pub fn archive(&self, id: &AthleteId) -> Result<Athlete, RosterServiceError> {
        let athlete = self.modify(id, |athlete| {
            athlete.status = AthleteStatus::Archived;
        })?;
        info!(athlete = %athlete.id, "athlete archived");
        Ok(athlete)
    }

    pub fn get(&self, id: &AthleteId) -> Result<Athlete, RosterServiceError> {
        self.load(id)
    }

    pub fn list(&self) -> Result<Vec<Athlete>, RosterServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn scorecard(&self, id: &AthleteId) -> Result<Scorecard, RosterServiceError> {
        let athlete = self.load(id)?;
        Ok(self.scorecard_for(&athlete))
    }

    pub fn budget(&self, gender: Gender) -> Result<ScholarshipBudget, RosterServiceError> {
        let athletes = self.repository.list()?;
        Ok(aggregate(&athletes, gender, &self.config.budgets))
    }

    pub fn report(&self, generated_on: NaiveDate) -> Result<RosterReport, RosterServiceError> {
        let athletes = self.repository.list()?;
        Ok(build_report(&athletes, &self.config, &self.scorer, generated_on))
    }

    fn scorecard_for(&self, athlete: &Athlete) -> Scorecard {
        let tier = athlete.tier.current();
        let impact = self.scorer.score(athlete.evaluation.as_ref(), tier);
        let recommended_amount = recommend_amount(impact.total, self.config.max_scholarship);
        Scorecard {
            athlete_id: athlete.id.clone(),
            tier,
            manual_tier: athlete.tier.is_manual(),
            impact,
            recommended_amount,
            current_amount: athlete.scholarship_amount,
        }
    }

    fn check_budget(&self, athlete: &Athlete) -> Result<ScholarshipBudget, RosterServiceError> {
        let budget = self.budget(athlete.gender)?;
        if budget.is_over_allocated() && !athlete.is_archived() && athlete.scholarship_amount > 0.0
        {
            warn!(
                gender = athlete.gender.label(),
                allocated = budget.allocated,
                total = budget.total_budget,
                "scholarship pool over-allocated"
            );

            let mut details = BTreeMap::new();
            details.insert("allocated".to_string(), format!("{:.2}", budget.allocated));
            details.insert("total_budget".to_string(), format!("{:.2}", budget.total_budget));
            details.insert("remaining".to_string(), format!("{:.2}", budget.remaining));
            self.alerts.publish(BudgetAlert {
                template: "scholarship_over_allocated".to_string(),
                gender: athlete.gender,
                athlete_id: athlete.id.clone(),
                details,
            })?;
        }
        Ok(budget)
    }
}

fn validate_amount(amount: f64) -> Result<(), RosterServiceError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(RosterServiceError::InvalidAmount(amount))
    }
}

/// Error raised by the roster service.
#[derive(Debug, thiserror::Error)]
pub enum RosterServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
    #[error("scholarship amount must be a non-negative number (got {0})")]
    InvalidAmount(f64),
}
