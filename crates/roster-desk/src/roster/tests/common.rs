use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::roster::budget::BudgetConfig;
use crate::roster::config::ScoringConfig;
use crate::roster::domain::{
    Athlete, AthleteId, Evaluation, Gender, PotentialTier, Rating, Tier,
};
use crate::roster::repository::{
    AlertError, AlertPublisher, AthleteRepository, BudgetAlert, RepositoryError,
};
use crate::roster::router::roster_router;
use crate::roster::service::{NewAthlete, RosterService};

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<BTreeMap<AthleteId, Athlete>>,
}

impl AthleteRepository for MemoryRepository {
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
        match guard.get_mut(&athlete.id) {
            Some(existing) => {
                *existing = athlete;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &AthleteId) -> Result<Option<Athlete>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Athlete>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Memory store whose reads stall, widening any read-modify-write window.
#[derive(Default)]
pub(super) struct SlowRepository {
    inner: MemoryRepository,
}

impl AthleteRepository for SlowRepository {
    fn insert(&self, athlete: Athlete) -> Result<Athlete, RepositoryError> {
        self.inner.insert(athlete)
    }

    fn update(&self, athlete: Athlete) -> Result<(), RepositoryError> {
        self.inner.update(athlete)
    }

    fn fetch(&self, id: &AthleteId) -> Result<Option<Athlete>, RepositoryError> {
        std::thread::sleep(std::time::Duration::from_millis(50));
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<Athlete>, RepositoryError> {
        self.inner.list()
    }
}

pub(super) struct UnavailableRepository;

impl AthleteRepository for UnavailableRepository {
    fn insert(&self, _athlete: Athlete) -> Result<Athlete, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }

    fn update(&self, _athlete: Athlete) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }

    fn fetch(&self, _id: &AthleteId) -> Result<Option<Athlete>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }

    fn list(&self) -> Result<Vec<Athlete>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryAlerts {
    events: Mutex<Vec<BudgetAlert>>,
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: BudgetAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<BudgetAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::standard(BudgetConfig {
        men: 20_000.0,
        women: 15_000.0,
    })
}

pub(super) type TestService = RosterService<MemoryRepository, MemoryAlerts>;

pub(super) fn build_service() -> (TestService, Arc<MemoryRepository>, Arc<MemoryAlerts>) {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = RosterService::new(repository.clone(), alerts.clone(), scoring_config());
    (service, repository, alerts)
}

pub(super) fn sprinter() -> NewAthlete {
    NewAthlete {
        id: None,
        name: "Jordan Reyes".to_string(),
        event: "100m".to_string(),
        personal_best: "10.25".to_string(),
        gender: Gender::Men,
        status: Default::default(),
        scholarship_amount: 6_000.0,
        tier_override: None,
    }
}

pub(super) fn jumper() -> NewAthlete {
    NewAthlete {
        id: Some(AthleteId("ath-lj".to_string())),
        name: "Morgan Ellis".to_string(),
        event: "Long Jump".to_string(),
        personal_best: "6.50m".to_string(),
        gender: Gender::Men,
        status: Default::default(),
        scholarship_amount: 4_000.0,
        tier_override: None,
    }
}

pub(super) fn strong_evaluation(potential_tier: Option<Tier>) -> Evaluation {
    Evaluation {
        technical_skill: Rating::new(5),
        athletic_ability: Rating::new(4),
        competitive_instinct: Rating::new(5),
        academic_potential: Rating::new(4),
        work_ethic: Rating::new(5),
        team_culture: Rating::new(4),
        coachability: Rating::new(5),
        potential_tier: potential_tier.map(PotentialTier::from),
        notes: "Conference finalist".to_string(),
    }
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    roster_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
