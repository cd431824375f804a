mod config;

pub use config::{ImpactConfig, MultiplierTable};

use super::domain::{rating_points, Evaluation, PotentialTier, Rating, Tier};
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the multiplier rubric to an evaluation.
#[derive(Debug, Clone, Default)]
pub struct ImpactScorer {
    config: ImpactConfig,
}

impl ImpactScorer {
    pub fn new(config: ImpactConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, evaluation: Option<&Evaluation>, athlete_tier: Tier) -> ImpactScore {
        let Some(evaluation) = evaluation else {
            return ImpactScore::unevaluated();
        };

        let performance = averaged_component(
            ImpactDimension::Performance,
            &[
                evaluation.technical_skill,
                evaluation.athletic_ability,
                evaluation.competitive_instinct,
            ],
        );
        let character = averaged_component(
            ImpactDimension::Character,
            &[
                evaluation.work_ethic,
                evaluation.team_culture,
                evaluation.coachability,
            ],
        );
        let academic_raw = rating_points(evaluation.academic_potential) * 4.0;
        let academic = RawComponent {
            dimension: ImpactDimension::Academic,
            points: academic_raw,
            notes: match evaluation.academic_potential {
                Some(rating) => format!("academic potential {} of 5", rating.value()),
                None => "academic potential not rated".to_string(),
            },
        };

        let (multiplier, basis) = match &evaluation.potential_tier {
            Some(PotentialTier::Known(tier)) => (
                self.config.potential.for_tier(*tier),
                MultiplierBasis::PotentialTier(*tier),
            ),
            Some(PotentialTier::Unrecognized(_)) => (
                self.config.potential.fallback,
                MultiplierBasis::UnrecognizedPotential,
            ),
            None => (
                self.config.current.for_tier(athlete_tier),
                MultiplierBasis::CurrentTier(athlete_tier),
            ),
        };

        let raw_total = performance.points + character.points + academic.points;
        let total = (raw_total * multiplier).round() as i32;

        ImpactScore {
            total,
            performance: whole_points(performance.points),
            character: whole_points(character.points),
            academic: whole_points(academic.points),
            multiplier,
            basis,
            components: vec![
                performance.into_component(),
                character.into_component(),
                academic.into_component(),
            ],
        }
    }
}

/// Score an evaluation with the standard multiplier rubric.
pub fn compute_impact(evaluation: Option<&Evaluation>, athlete_tier: Tier) -> ImpactScore {
    ImpactScorer::default().score(evaluation, athlete_tier)
}

struct RawComponent {
    dimension: ImpactDimension,
    points: f64,
    notes: String,
}

impl RawComponent {
    fn into_component(self) -> ImpactComponent {
        ImpactComponent {
            dimension: self.dimension,
            points: whole_points(self.points),
            notes: self.notes,
        }
    }
}

// Unset ratings count as zero and still sit in the denominator.
fn averaged_component(dimension: ImpactDimension, ratings: &[Option<Rating>; 3]) -> RawComponent {
    let sum: f64 = ratings.iter().copied().map(rating_points).sum();
    let average = sum / ratings.len() as f64;
    let unset = ratings.iter().filter(|rating| rating.is_none()).count();

    let notes = if unset == 0 {
        format!("average rating {average:.2}")
    } else {
        format!("average rating {average:.2} ({unset} unrated counted as 0)")
    };

    RawComponent {
        dimension,
        points: average * 10.0,
        notes,
    }
}

fn whole_points(points: f64) -> u8 {
    points.round().clamp(0.0, f64::from(u8::MAX)) as u8
}

/// Rating group contributing to an impact score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDimension {
    Performance,
    Character,
    Academic,
}

impl ImpactDimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Character => "Character",
            Self::Academic => "Academic",
        }
    }

    pub const fn max_points(self) -> u8 {
        match self {
            Self::Performance | Self::Character => 50,
            Self::Academic => 20,
        }
    }
}

/// Points awarded for one dimension, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactComponent {
    pub dimension: ImpactDimension,
    pub points: u8,
    pub notes: String,
}

/// Which tier drove the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "tier", rename_all = "snake_case")]
pub enum MultiplierBasis {
    NotEvaluated,
    PotentialTier(Tier),
    /// Projection given but not a tier name; the fallback multiplier applies.
    UnrecognizedPotential,
    CurrentTier(Tier),
}

/// Composite score derived from an evaluation. Recomputed on demand, never stored alone.
///
/// `total` is not clamped: a perfect evaluation with an elite projection scores 180.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactScore {
    pub total: i32,
    pub performance: u8,
    pub character: u8,
    pub academic: u8,
    pub multiplier: f64,
    pub basis: MultiplierBasis,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ImpactComponent>,
}

impl ImpactScore {
    pub fn unevaluated() -> Self {
        Self {
            total: 0,
            performance: 0,
            character: 0,
            academic: 0,
            multiplier: 1.0,
            basis: MultiplierBasis::NotEvaluated,
            components: Vec::new(),
        }
    }

    /// Total squeezed into 0–100 for percentage-width renderings.
    pub fn display_percent(&self) -> u8 {
        self.total.clamp(0, 100) as u8
    }
}
