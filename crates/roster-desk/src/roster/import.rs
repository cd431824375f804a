use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::classification::{classify_listed, TierThresholdTable};
use super::domain::{Athlete, AthleteId, AthleteStatus, Gender, TierAssignment};

/// Failure while reading a roster or threshold export.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "ID", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Event", default, deserialize_with = "empty_string_as_none")]
    event: Option<String>,
    #[serde(
        rename = "Personal Best",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    personal_best: Option<String>,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(
        rename = "Scholarship",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    scholarship: Option<String>,
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}

/// Row-numbered id, bumped past any id the file already uses.
fn generated_id(start: usize, taken: &mut HashSet<String>) -> String {
    let mut sequence = start;
    loop {
        let candidate = format!("ath-{sequence:04}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        sequence += 1;
    }
}

/// Loads roster exports and auto-classifies every imported athlete.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        thresholds: &TierThresholdTable,
    ) -> Result<Vec<Athlete>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, thresholds)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        thresholds: &TierThresholdTable,
    ) -> Result<Vec<Athlete>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let rows = csv_reader
            .deserialize::<RosterRow>()
            .collect::<Result<Vec<_>, _>>()?;

        let mut taken = HashSet::new();
        for (index, row) in rows.iter().enumerate() {
            if let Some(id) = &row.id {
                if !taken.insert(id.clone()) {
                    return Err(ImportError::InvalidRow {
                        line: index + 2,
                        reason: format!("duplicate athlete id '{id}'"),
                    });
                }
            }
        }

        let mut athletes = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let line = index + 2;

            let gender = Gender::parse(&row.gender).ok_or_else(|| ImportError::InvalidRow {
                line,
                reason: format!("unknown gender '{}'", row.gender),
            })?;
            let status = match row.status.as_deref() {
                Some(raw) => AthleteStatus::parse(raw).ok_or_else(|| ImportError::InvalidRow {
                    line,
                    reason: format!("unknown status '{raw}'"),
                })?,
                None => AthleteStatus::Active,
            };
            let scholarship_amount = match row.scholarship.as_deref() {
                Some(raw) => parse_amount(raw).ok_or_else(|| ImportError::InvalidRow {
                    line,
                    reason: format!("invalid scholarship amount '{raw}'"),
                })?,
                None => 0.0,
            };

            let event = row.event.unwrap_or_default();
            let personal_best = row.personal_best.unwrap_or_default();
            let tier = classify_listed(&event, &personal_best, gender, thresholds);

            athletes.push(Athlete {
                id: AthleteId(match row.id {
                    Some(id) => id,
                    None => generated_id(index + 1, &mut taken),
                }),
                name: row.name,
                event,
                personal_best,
                gender,
                status,
                tier: TierAssignment::Auto(tier),
                scholarship_amount,
                evaluation: None,
            });
        }

        tracing::debug!(count = athletes.len(), "roster import parsed");
        Ok(athletes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::Tier;
    use std::io::Cursor;

    const ROSTER: &str = "Name,Event,Personal Best,Gender,Status,Scholarship\n\
Jordan Reyes,100m,10.25,M,,\"$4,500\"\n\
Casey Lin,Long Jump,6.05m,F,redshirt,3000\n\
Riley Park,Shot Put,,Women,archived,\n";

    #[test]
    fn imports_and_classifies_rows() {
        let athletes = RosterImporter::from_reader(
            Cursor::new(ROSTER),
            &TierThresholdTable::standard(),
        )
        .expect("import succeeds");

        assert_eq!(athletes.len(), 3);

        let sprinter = &athletes[0];
        assert_eq!(sprinter.id, AthleteId("ath-0001".to_string()));
        assert_eq!(sprinter.tier, TierAssignment::Auto(Tier::Elite));
        assert_eq!(sprinter.scholarship_amount, 4_500.0);
        assert_eq!(sprinter.status, AthleteStatus::Active);

        let jumper = &athletes[1];
        assert_eq!(jumper.gender, Gender::Women);
        assert_eq!(jumper.status, AthleteStatus::Redshirt);
        assert_eq!(jumper.tier, TierAssignment::Auto(Tier::Competitive));

        let thrower = &athletes[2];
        assert!(thrower.is_archived());
        assert_eq!(thrower.tier, TierAssignment::Auto(Tier::Prospect));
        assert_eq!(thrower.scholarship_amount, 0.0);
    }

    #[test]
    fn explicit_ids_are_preserved() {
        let csv = "ID,Name,Event,Personal Best,Gender,Status,Scholarship\nath-77,Sam Ortiz,800m,1:51.00,M,,\n";
        let athletes =
            RosterImporter::from_reader(Cursor::new(csv), &TierThresholdTable::standard())
                .expect("import succeeds");
        assert_eq!(athletes[0].id, AthleteId("ath-77".to_string()));
    }

    #[test]
    fn rejects_unknown_gender_with_line_number() {
        let csv = "Name,Event,Personal Best,Gender,Status,Scholarship\nA,100m,10.9,M,,\nB,100m,11.0,X,,\n";
        let error =
            RosterImporter::from_reader(Cursor::new(csv), &TierThresholdTable::standard())
                .expect_err("gender rejected");

        match error {
            ImportError::InvalidRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("gender"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn generated_ids_skip_ids_used_elsewhere_in_file() {
        let csv = "ID,Name,Event,Personal Best,Gender,Status,Scholarship\n\
,Jordan Reyes,100m,10.25,M,,\n\
ath-0001,Sam Ortiz,800m,1:51.00,M,,\n\
,Casey Lin,Long Jump,6.05m,F,,\n";
        let athletes =
            RosterImporter::from_reader(Cursor::new(csv), &TierThresholdTable::standard())
                .expect("import succeeds");

        let ids: Vec<&str> = athletes.iter().map(|athlete| athlete.id.0.as_str()).collect();
        assert_eq!(ids, ["ath-0002", "ath-0001", "ath-0003"]);
    }

    #[test]
    fn duplicate_explicit_ids_are_rejected_with_line_number() {
        let csv = "ID,Name,Event,Personal Best,Gender,Status,Scholarship\n\
ath-9,Jordan Reyes,100m,10.25,M,,\n\
ath-9,Sam Ortiz,800m,1:51.00,M,,\n";
        match RosterImporter::from_reader(Cursor::new(csv), &TierThresholdTable::standard()) {
            Err(ImportError::InvalidRow { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("ath-9"));
            }
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_scholarships() {
        let csv = "Name,Event,Personal Best,Gender,Status,Scholarship\nA,100m,10.9,M,,-50\n";
        assert!(matches!(
            RosterImporter::from_reader(Cursor::new(csv), &TierThresholdTable::standard()),
            Err(ImportError::InvalidRow { line: 2, .. })
        ));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error =
            RosterImporter::from_path("./does-not-exist.csv", &TierThresholdTable::standard())
                .expect_err("expected io error");
        assert!(matches!(error, ImportError::Io(_)));
    }
}
