use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use roster_desk::roster::{
    AlertError, AlertPublisher, Athlete, AthleteId, AthleteRepository, BudgetAlert, Event,
    Gender, RepositoryError, Tier,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAthleteRepository {
    records: Arc<Mutex<HashMap<AthleteId, Athlete>>>,
}

impl AthleteRepository for InMemoryAthleteRepository {
    fn insert(&self, athlete: Athlete) -> Result<Athlete, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&athlete.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(athlete.id.clone(), athlete.clone());
        Ok(athlete)
    }

    fn update(&self, athlete: Athlete) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&athlete.id) {
            guard.insert(athlete.id.clone(), athlete);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &AthleteId) -> Result<Option<Athlete>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Athlete>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut athletes: Vec<Athlete> = guard.values().cloned().collect();
        athletes.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(athletes)
    }
}

/// Keeps alerts in memory and mirrors each one to the log.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<BudgetAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: BudgetAlert) -> Result<(), AlertError> {
        warn!(
            template = %alert.template,
            gender = alert.gender.label(),
            athlete = %alert.athlete_id,
            "budget alert raised"
        );
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    #[cfg(test)]
    pub(crate) fn events(&self) -> Vec<BudgetAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_event(raw: &str) -> Result<Event, String> {
    Event::parse(raw).ok_or_else(|| format!("unknown event '{raw}'"))
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    Gender::parse(raw).ok_or_else(|| format!("unknown gender '{raw}' (expected M or F)"))
}

pub(crate) fn parse_tier(raw: &str) -> Result<Tier, String> {
    Tier::parse(raw).ok_or_else(|| {
        format!("unknown tier '{raw}' (expected elite, competitive, developing, or prospect)")
    })
}
