use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::domain::{Event, Gender, Tier};
use super::super::import::ImportError;

/// Men's and women's cutoff marks for one tier of one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub men: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub women: Option<String>,
}

impl ThresholdPair {
    pub fn for_gender(&self, gender: Gender) -> Option<&str> {
        match gender {
            Gender::Men => self.men.as_deref(),
            Gender::Women => self.women.as_deref(),
        }
    }
}

/// Per-tier, per-event, per-gender cutoffs used for auto-classification.
///
/// The table is plain reference data. Editing screens clone it and hand the edited copy
/// back in; the classifier only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholdTable {
    tiers: BTreeMap<Tier, BTreeMap<Event, ThresholdPair>>,
}

impl TierThresholdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) a cutoff.
    pub fn set(&mut self, tier: Tier, event: Event, gender: Gender, mark: impl Into<String>) {
        let pair = self
            .tiers
            .entry(tier)
            .or_default()
            .entry(event)
            .or_default();
        match gender {
            Gender::Men => pair.men = Some(mark.into()),
            Gender::Women => pair.women = Some(mark.into()),
        }
    }

    pub fn threshold(&self, tier: Tier, event: Event, gender: Gender) -> Option<&str> {
        self.tiers
            .get(&tier)
            .and_then(|events| events.get(&event))
            .and_then(|pair| pair.for_gender(gender))
    }

    /// Collegiate reference cutoffs shipped with the roster desk.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (event, men, women) in STANDARD_MARKS {
            for (index, tier) in Tier::by_priority().into_iter().enumerate() {
                if let Some(marks) = men {
                    table.set(tier, *event, Gender::Men, marks[index]);
                }
                if let Some(marks) = women {
                    table.set(tier, *event, Gender::Women, marks[index]);
                }
            }
        }
        table
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Build a table from `Tier,Event,Men,Women` rows. Blank mark cells are left unset.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::new();
        for (index, record) in csv_reader.deserialize::<ThresholdRow>().enumerate() {
            let row = record?;
            let line = index + 2;
            let tier = Tier::parse(&row.tier).ok_or_else(|| ImportError::InvalidRow {
                line,
                reason: format!("unknown tier '{}'", row.tier),
            })?;
            let event = Event::parse(&row.event).ok_or_else(|| ImportError::InvalidRow {
                line,
                reason: format!("unknown event '{}'", row.event),
            })?;

            if let Some(mark) = row.men {
                table.set(tier, event, Gender::Men, mark);
            }
            if let Some(mark) = row.women {
                table.set(tier, event, Gender::Women, mark);
            }
        }

        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
struct ThresholdRow {
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Event")]
    event: String,
    #[serde(
        rename = "Men",
        default,
        deserialize_with = "super::super::import::empty_string_as_none"
    )]
    men: Option<String>,
    #[serde(
        rename = "Women",
        default,
        deserialize_with = "super::super::import::empty_string_as_none"
    )]
    women: Option<String>,
}

type TierMarks = Option<[&'static str; 4]>;

/// Elite, competitive, developing, prospect cutoffs per event.
const STANDARD_MARKS: &[(Event, TierMarks, TierMarks)] = &[
    (
        Event::Dash100,
        Some(["10.30", "10.60", "10.90", "11.20"]),
        Some(["11.40", "11.80", "12.20", "12.60"]),
    ),
    (
        Event::Dash200,
        Some(["20.80", "21.40", "22.00", "22.60"]),
        Some(["23.20", "24.00", "24.80", "25.60"]),
    ),
    (
        Event::Dash400,
        Some(["46.50", "48.00", "49.50", "51.00"]),
        Some(["53.00", "55.00", "57.00", "59.00"]),
    ),
    (
        Event::Run800,
        Some(["1:49.00", "1:52.00", "1:55.00", "1:58.00"]),
        Some(["2:06.00", "2:10.00", "2:15.00", "2:20.00"]),
    ),
    (
        Event::Run1500,
        Some(["3:45.00", "3:52.00", "3:58.00", "4:05.00"]),
        Some(["4:20.00", "4:30.00", "4:40.00", "4:50.00"]),
    ),
    (
        Event::Mile,
        Some(["4:02.00", "4:10.00", "4:17.00", "4:25.00"]),
        Some(["4:40.00", "4:52.00", "5:03.00", "5:15.00"]),
    ),
    (
        Event::Run5000,
        Some(["14:00.00", "14:30.00", "15:00.00", "15:45.00"]),
        Some(["16:10.00", "16:50.00", "17:30.00", "18:20.00"]),
    ),
    (
        Event::Run10000,
        Some(["29:10.00", "30:15.00", "31:20.00", "32:40.00"]),
        Some(["33:30.00", "35:00.00", "36:30.00", "38:00.00"]),
    ),
    (
        Event::Steeplechase3000,
        Some(["8:50.00", "9:10.00", "9:30.00", "9:55.00"]),
        Some(["10:15.00", "10:45.00", "11:15.00", "11:45.00"]),
    ),
    (Event::Hurdles110, Some(["13.80", "14.30", "14.90", "15.50"]), None),
    (Event::Hurdles100, None, Some(["13.40", "14.00", "14.60", "15.30"])),
    (
        Event::Hurdles400,
        Some(["51.00", "53.00", "55.00", "57.50"]),
        Some(["58.00", "61.00", "64.00", "67.00"]),
    ),
    (
        Event::HighJump,
        Some(["2.15m", "2.05m", "1.95m", "1.85m"]),
        Some(["1.80m", "1.72m", "1.65m", "1.58m"]),
    ),
    (
        Event::PoleVault,
        Some(["5.30m", "5.00m", "4.70m", "4.35m"]),
        Some(["4.20m", "3.90m", "3.60m", "3.30m"]),
    ),
    (
        Event::LongJump,
        Some(["7.60m", "7.20m", "6.80m", "6.30m"]),
        Some(["6.30m", "5.90m", "5.50m", "5.10m"]),
    ),
    (
        Event::TripleJump,
        Some(["15.60m", "14.90m", "14.20m", "13.50m"]),
        Some(["13.00m", "12.40m", "11.80m", "11.20m"]),
    ),
    (
        Event::ShotPut,
        Some(["18.00m", "16.50m", "15.00m", "13.50m"]),
        Some(["16.00m", "14.50m", "13.00m", "11.50m"]),
    ),
    (
        Event::Discus,
        Some(["56.00m", "51.00m", "46.00m", "41.00m"]),
        Some(["52.00m", "47.00m", "42.00m", "37.00m"]),
    ),
    (
        Event::Javelin,
        Some(["68.00m", "62.00m", "56.00m", "50.00m"]),
        Some(["50.00m", "45.00m", "40.00m", "35.00m"]),
    ),
    (
        Event::Hammer,
        Some(["62.00m", "56.00m", "50.00m", "44.00m"]),
        Some(["60.00m", "54.00m", "48.00m", "42.00m"]),
    ),
];
