mod thresholds;

pub use thresholds::{ThresholdPair, TierThresholdTable};

use super::domain::{Event, Gender, Tier};
use super::performance::{is_unparsable, parse_magnitude};

/// Determine the best tier whose cutoff the mark satisfies.
///
/// Tiers are checked elite first. Missing or unreadable cutoffs skip that tier, an
/// unreadable athlete mark never qualifies, and anything that matches nothing lands in
/// [`Tier::Prospect`].
pub fn classify_tier(
    event: Event,
    result: &str,
    gender: Gender,
    thresholds: &TierThresholdTable,
) -> Tier {
    let athlete = parse_magnitude(result);
    if is_unparsable(athlete) {
        return Tier::Prospect;
    }

    let higher_is_better = event.family().higher_is_better();

    Tier::by_priority()
        .into_iter()
        .find(|tier| {
            let Some(raw) = thresholds.threshold(*tier, event, gender) else {
                return false;
            };
            let cutoff = parse_magnitude(raw);
            if is_unparsable(cutoff) {
                return false;
            }
            if higher_is_better {
                athlete >= cutoff
            } else {
                athlete <= cutoff
            }
        })
        .unwrap_or(Tier::Prospect)
}

/// Classify using an event display name; unknown events fall back to [`Tier::Prospect`].
pub fn classify_listed(
    event_name: &str,
    result: &str,
    gender: Gender,
    thresholds: &TierThresholdTable,
) -> Tier {
    match Event::parse(event_name) {
        Some(event) => classify_tier(event, result, gender, thresholds),
        None => Tier::Prospect,
    }
}
