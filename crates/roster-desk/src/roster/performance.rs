//! Conversion of competition marks into comparable magnitudes.
//!
//! Accepted forms are `MM:SS.ss` (minutes and seconds), `SS.ss` (seconds) and `D.DDm`
//! (meters). Anything else collapses to [`UNPARSABLE`] instead of failing, so a bad
//! mark only ever costs an athlete their tier and never aborts classification.

/// Sentinel returned for marks that cannot be read. Classification never lets it qualify.
pub const UNPARSABLE: f64 = f64::INFINITY;

/// Parse a mark into seconds (times) or meters (distances).
pub fn parse_magnitude(result: &str) -> f64 {
    let trimmed = result.trim();
    if trimmed.is_empty() {
        return UNPARSABLE;
    }

    let parsed = if let Some((minutes, seconds)) = trimmed.split_once(':') {
        parse_clock(minutes, seconds)
    } else if let Some(meters) = trimmed.strip_suffix(['m', 'M']) {
        parse_decimal(meters)
    } else {
        parse_decimal(trimmed)
    };

    parsed.unwrap_or(UNPARSABLE)
}

/// True when the magnitude is the sentinel (or otherwise not a usable number).
pub fn is_unparsable(magnitude: f64) -> bool {
    !magnitude.is_finite()
}

fn parse_clock(minutes: &str, seconds: &str) -> Option<f64> {
    let minutes = minutes.trim().parse::<u32>().ok()?;
    let seconds = parse_decimal(seconds)?;
    Some(f64::from(minutes) * 60.0 + seconds)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(parse_magnitude("1:48.00"), 108.0);
        assert_eq!(parse_magnitude("14:05.5"), 845.5);
    }

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_magnitude("11.45"), 11.45);
        assert_eq!(parse_magnitude(" 10.25 "), 10.25);
    }

    #[test]
    fn parses_meters() {
        assert_eq!(parse_magnitude("6.12m"), 6.12);
        assert_eq!(parse_magnitude("2.05 m"), 2.05);
    }

    #[test]
    fn garbage_maps_to_sentinel() {
        assert_eq!(parse_magnitude("garbage"), f64::INFINITY);
        assert_eq!(parse_magnitude(""), UNPARSABLE);
        assert_eq!(parse_magnitude("1:xx"), UNPARSABLE);
        assert_eq!(parse_magnitude("a:12.00"), UNPARSABLE);
        assert_eq!(parse_magnitude("1:2:3"), UNPARSABLE);
        assert_eq!(parse_magnitude("m"), UNPARSABLE);
        assert_eq!(parse_magnitude("NaN"), UNPARSABLE);
        assert_eq!(parse_magnitude("inf"), UNPARSABLE);
        assert!(is_unparsable(parse_magnitude("DNF")));
    }
}
