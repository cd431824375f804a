use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for athletes on the roster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AthleteId(pub String);

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Competition gender used to pick threshold columns and budget pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Men,
    #[serde(rename = "F")]
    Women,
}

impl Gender {
    pub const fn ordered() -> [Self; 2] {
        [Self::Men, Self::Women]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Men => "M",
            Self::Women => "F",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "m" | "men" | "male" | "mens" | "men's" => Some(Self::Men),
            "f" | "w" | "women" | "female" | "womens" | "women's" => Some(Self::Women),
            _ => None,
        }
    }
}

/// Ordinal performance classification. Ordering runs from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Prospect,
    Developing,
    Competitive,
    Elite,
}

impl Tier {
    /// Tiers in classification priority: best first.
    pub const fn by_priority() -> [Self; 4] {
        [Self::Elite, Self::Competitive, Self::Developing, Self::Prospect]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::Competitive => "Competitive",
            Self::Developing => "Developing",
            Self::Prospect => "Prospect",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "elite" => Some(Self::Elite),
            "competitive" => Some(Self::Competitive),
            "developing" => Some(Self::Developing),
            "prospect" => Some(Self::Prospect),
            _ => None,
        }
    }
}

/// Comparison direction for an event's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFamily {
    /// Running and hurdling events: a lower time is better.
    Track,
    /// Jumps and throws: a larger mark is better.
    Field,
}

impl EventFamily {
    pub const fn higher_is_better(self) -> bool {
        matches!(self, Self::Field)
    }
}

/// Canonical event identifiers. Display names are mapped onto these with [`Event::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Event {
    Dash100,
    Dash200,
    Dash400,
    Run800,
    Run1500,
    Mile,
    Run3000,
    Steeplechase3000,
    Run5000,
    Run10000,
    Hurdles100,
    Hurdles110,
    Hurdles400,
    HighJump,
    PoleVault,
    LongJump,
    TripleJump,
    ShotPut,
    Discus,
    Javelin,
    Hammer,
}

impl Event {
    pub const fn all() -> [Self; 21] {
        [
            Self::Dash100,
            Self::Dash200,
            Self::Dash400,
            Self::Run800,
            Self::Run1500,
            Self::Mile,
            Self::Run3000,
            Self::Steeplechase3000,
            Self::Run5000,
            Self::Run10000,
            Self::Hurdles100,
            Self::Hurdles110,
            Self::Hurdles400,
            Self::HighJump,
            Self::PoleVault,
            Self::LongJump,
            Self::TripleJump,
            Self::ShotPut,
            Self::Discus,
            Self::Javelin,
            Self::Hammer,
        ]
    }

    pub const fn family(self) -> EventFamily {
        match self {
            Self::HighJump
            | Self::PoleVault
            | Self::LongJump
            | Self::TripleJump
            | Self::ShotPut
            | Self::Discus
            | Self::Javelin
            | Self::Hammer => EventFamily::Field,
            _ => EventFamily::Track,
        }
    }

    /// Stable identifier used on the wire and in threshold files.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Dash100 => "100m",
            Self::Dash200 => "200m",
            Self::Dash400 => "400m",
            Self::Run800 => "800m",
            Self::Run1500 => "1500m",
            Self::Mile => "mile",
            Self::Run3000 => "3000m",
            Self::Steeplechase3000 => "3000m_steeplechase",
            Self::Run5000 => "5000m",
            Self::Run10000 => "10000m",
            Self::Hurdles100 => "100m_hurdles",
            Self::Hurdles110 => "110m_hurdles",
            Self::Hurdles400 => "400m_hurdles",
            Self::HighJump => "high_jump",
            Self::PoleVault => "pole_vault",
            Self::LongJump => "long_jump",
            Self::TripleJump => "triple_jump",
            Self::ShotPut => "shot_put",
            Self::Discus => "discus",
            Self::Javelin => "javelin",
            Self::Hammer => "hammer",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dash100 => "100m",
            Self::Dash200 => "200m",
            Self::Dash400 => "400m",
            Self::Run800 => "800m",
            Self::Run1500 => "1500m",
            Self::Mile => "Mile",
            Self::Run3000 => "3000m",
            Self::Steeplechase3000 => "3000m Steeplechase",
            Self::Run5000 => "5000m",
            Self::Run10000 => "10000m",
            Self::Hurdles100 => "100m Hurdles",
            Self::Hurdles110 => "110m Hurdles",
            Self::Hurdles400 => "400m Hurdles",
            Self::HighJump => "High Jump",
            Self::PoleVault => "Pole Vault",
            Self::LongJump => "Long Jump",
            Self::TripleJump => "Triple Jump",
            Self::ShotPut => "Shot Put",
            Self::Discus => "Discus",
            Self::Javelin => "Javelin",
            Self::Hammer => "Hammer",
        }
    }

    /// Resolve an identifier or display name, ignoring case, spacing, and dashes.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = normalize_event_name(raw);
        if key.is_empty() {
            return None;
        }

        if let Some(event) = Self::all().into_iter().find(|event| event.id() == key) {
            return Some(event);
        }

        match key.as_str() {
            "100m_dash" | "100" => Some(Self::Dash100),
            "200m_dash" | "200" => Some(Self::Dash200),
            "400m_dash" | "400" => Some(Self::Dash400),
            "mile_run" | "1_mile" => Some(Self::Mile),
            "steeplechase" | "3000m_sc" => Some(Self::Steeplechase3000),
            "shot" => Some(Self::ShotPut),
            "discus_throw" => Some(Self::Discus),
            "javelin_throw" => Some(Self::Javelin),
            "hammer_throw" => Some(Self::Hammer),
            _ => None,
        }
    }
}

fn normalize_event_name(raw: &str) -> String {
    raw.replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_lowercase()
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for Event {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown event '{value}'"))
    }
}

impl From<Event> for String {
    fn from(value: Event) -> Self {
        value.id().to_string()
    }
}

/// Tier state for an athlete: either tracking auto-classification or pinned by a coach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "tier", rename_all = "snake_case")]
pub enum TierAssignment {
    Auto(Tier),
    ManualOverride(Tier),
}

impl TierAssignment {
    pub const fn current(self) -> Tier {
        match self {
            Self::Auto(tier) | Self::ManualOverride(tier) => tier,
        }
    }

    pub const fn is_manual(self) -> bool {
        matches!(self, Self::ManualOverride(_))
    }
}

impl Default for TierAssignment {
    fn default() -> Self {
        Self::Auto(Tier::Prospect)
    }
}

/// Roster status. Archived athletes are soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AthleteStatus {
    #[default]
    Active,
    Redshirt,
    Injured,
    Archived,
}

impl AthleteStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "active" => Some(Self::Active),
            "redshirt" => Some(Self::Redshirt),
            "injured" => Some(Self::Injured),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Coach rating on the 1–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    fn from_number(value: f64) -> Option<Self> {
        if value.fract() != 0.0 || !value.is_finite() {
            return None;
        }
        if value < f64::from(Self::MIN) || value > f64::from(Self::MAX) {
            return None;
        }
        Self::new(value as u8)
    }

    fn from_text(value: &str) -> Option<Self> {
        value.trim().parse::<u8>().ok().and_then(Self::new)
    }
}

/// Points contributed by an optional rating; unset counts as zero.
pub(crate) fn rating_points(rating: Option<Rating>) -> f64 {
    rating.map(|rating| f64::from(rating.value())).unwrap_or(0.0)
}

/// Accepts numbers or numeric strings; anything outside 1–5 is treated as unset.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Number(f64),
        Text(String),
    }

    let raw = Option::<RawRating>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        RawRating::Number(number) => Rating::from_number(number),
        RawRating::Text(text) => Rating::from_text(&text),
    }))
}

/// Coach projection of where an athlete will end up.
///
/// Labels that do not name a tier are kept as entered and score with the fallback
/// multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PotentialTier {
    Known(Tier),
    Unrecognized(String),
}

impl PotentialTier {
    /// `None` for a blank label.
    pub fn from_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match Tier::parse(trimmed) {
            Some(tier) => Self::Known(tier),
            None => Self::Unrecognized(trimmed.to_string()),
        })
    }
}

impl From<Tier> for PotentialTier {
    fn from(tier: Tier) -> Self {
        Self::Known(tier)
    }
}

fn lenient_potential_tier<'de, D>(deserializer: D) -> Result<Option<PotentialTier>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PotentialTier::from_label))
}

/// Subjective evaluation captured by the coaching staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evaluation {
    #[serde(deserialize_with = "lenient_rating")]
    pub technical_skill: Option<Rating>,
    #[serde(deserialize_with = "lenient_rating")]
    pub athletic_ability: Option<Rating>,
    #[serde(deserialize_with = "lenient_rating")]
    pub competitive_instinct: Option<Rating>,
    #[serde(deserialize_with = "lenient_rating")]
    pub academic_potential: Option<Rating>,
    #[serde(deserialize_with = "lenient_rating")]
    pub work_ethic: Option<Rating>,
    #[serde(deserialize_with = "lenient_rating")]
    pub team_culture: Option<Rating>,
    #[serde(deserialize_with = "lenient_rating")]
    pub coachability: Option<Rating>,
    #[serde(deserialize_with = "lenient_potential_tier")]
    pub potential_tier: Option<PotentialTier>,
    pub notes: String,
}

/// Roster entry consumed by classification, scoring, and the budget ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: AthleteId,
    pub name: String,
    /// Event as entered; resolved with [`Event::parse`].
    pub event: String,
    pub personal_best: String,
    pub gender: Gender,
    #[serde(default)]
    pub status: AthleteStatus,
    #[serde(default)]
    pub tier: TierAssignment,
    #[serde(default)]
    pub scholarship_amount: f64,
    #[serde(default)]
    pub evaluation: Option<Evaluation>,
}

impl Athlete {
    pub fn event(&self) -> Option<Event> {
        Event::parse(&self.event)
    }

    pub fn is_archived(&self) -> bool {
        self.status == AthleteStatus::Archived
    }
}
