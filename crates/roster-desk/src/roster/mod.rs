//! Track & field roster scoring: tier classification, impact scoring, scholarship
//! recommendations, and the gender-scoped budget ledger.
//!
//! The scoring functions are pure. [`RosterService`] layers the tier-override state,
//! repository access, and budget alerts on top of them.

pub mod budget;
pub mod classification;
pub mod config;
pub mod domain;
pub mod impact;
pub mod import;
pub mod performance;
pub mod report;
pub mod repository;
pub mod router;
pub mod scholarship;
pub mod service;

#[cfg(test)]
mod tests;

pub use budget::{aggregate, BudgetConfig, ScholarshipBudget};
pub use classification::{classify_listed, classify_tier, ThresholdPair, TierThresholdTable};
pub use config::ScoringConfig;
pub use domain::{
    Athlete, AthleteId, AthleteStatus, Evaluation, Event, EventFamily, Gender, PotentialTier,
    Rating, Tier, TierAssignment,
};
pub use impact::{
    compute_impact, ImpactComponent, ImpactConfig, ImpactDimension, ImpactScore, ImpactScorer,
    MultiplierBasis, MultiplierTable,
};
pub use import::{ImportError, RosterImporter};
pub use performance::{is_unparsable, parse_magnitude, UNPARSABLE};
pub use report::{build_report, RosterReport};
pub use repository::{
    AlertError, AlertPublisher, AthleteRepository, BudgetAlert, RepositoryError,
};
pub use router::roster_router;
pub use scholarship::{
    dollars_to_percentage, percentage_to_dollars, recommend_amount, ScholarshipError,
    DEFAULT_MAX_SCHOLARSHIP,
};
pub use service::{reclassify, NewAthlete, RosterService, RosterServiceError, Scorecard};
