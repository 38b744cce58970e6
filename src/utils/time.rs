//! Time utilities: parsing HH:MM[:SS] and formatting hour amounts.

use chrono::NaiveTime;

/// Parse `HH:MM:SS` or `HH:MM`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

/// Fractional hours → `HHh MMm` (e.g. 2.5 → `02h 30m`).
pub fn hours2readable(hours: f64) -> String {
    let total_mins = (hours * 60.0).round() as i64;
    format!("{:02}h {:02}m", total_mins / 60, total_mins % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_seconds() {
        assert_eq!(parse_time("06:00:00"), NaiveTime::from_hms_opt(6, 0, 0));
        assert_eq!(parse_time(" 14:30 "), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_time("25:00"), None);
    }

    #[test]
    fn readable_hours() {
        assert_eq!(hours2readable(2.5), "02h 30m");
        assert_eq!(hours2readable(0.75), "00h 45m");
    }
}
