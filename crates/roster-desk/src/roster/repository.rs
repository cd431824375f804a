use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Athlete, AthleteId, Gender};

/// Storage abstraction so the roster service can run against any backing store.
pub trait AthleteRepository: Send + Sync {
    fn insert(&self, athlete: Athlete) -> Result<Athlete, RepositoryError>;
    fn update(&self, athlete: Athlete) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AthleteId) -> Result<Option<Athlete>, RepositoryError>;
    /// Every stored athlete, archived ones included.
    fn list(&self) -> Result<Vec<Athlete>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("athlete already exists")]
    Conflict,
    #[error("athlete not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for budget notifications (e-mail, chat, compliance office).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: BudgetAlert) -> Result<(), AlertError>;
}

/// Alert payload raised when a scholarship pool is over-allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub template: String,
    pub gender: Gender,
    pub athlete_id: AthleteId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
