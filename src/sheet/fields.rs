//! Cell parsers for report values. None of these fail: unusable input
//! yields `None` (dates, times) or `0.0` (amounts, durations).

use crate::models::{DateRange, RunningTimeWindow};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static STRICT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*hours?").expect("valid regex"));
static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*minutes?").expect("valid regex"));
static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(\d+\.?\d*|\.\d+)").expect("valid regex"));
static FROM_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"From:\s*(\d{2}:\d{2}:\d{2})").expect("valid regex"));
static TO_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"To:\s*(\d{2}:\d{2}:\d{2})").expect("valid regex"));

const FLEXIBLE_DATE_FORMATS: [&str; 12] = [
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a %b %d %Y",
    "%d-%b-%y",
    "%d-%b-%Y",
];

const FLEXIBLE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// `YYYY-MM-DD` only, and only when it names a real calendar day.
pub fn parse_strict_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !STRICT_DATE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Permissive date parsing for legacy layouts: ISO dates, US-style
/// `M/D/YYYY`, month names, timestamps and Excel serial numbers.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(d) = parse_strict_date(s) {
        return Some(d);
    }

    for fmt in FLEXIBLE_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in FLEXIBLE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    excel_serial_to_date(s)
}

/// Strict first, then permissive.
pub fn parse_session_date(s: &str) -> Option<NaiveDate> {
    parse_strict_date(s).or_else(|| parse_flexible_date(s))
}

/// A session date is usable only inside the batch's accepted range.
pub fn parse_date_in_range(s: &str, range: &DateRange) -> Option<NaiveDate> {
    parse_session_date(s).filter(|d| range.contains(*d))
}

/// Whole-day serials as written by spreadsheet tools (1900 date system).
fn excel_serial_to_date(s: &str) -> Option<NaiveDate> {
    let serial: f64 = s.parse().ok()?;
    // 1900-03-01 .. 2199-12-31; anything else is a plain number.
    if !(61.0..=109_573.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// `"2 hours 30 minutes"` → 2.5, `"45 minutes"` → 0.75, `"3 hours"` → 3.0.
/// Text without an hour or minute component is 0.
pub fn parse_duration_hours(s: &str) -> f64 {
    let hours = HOURS
        .captures(s)
        .and_then(|c| c[1].parse::<f64>().ok())
        .unwrap_or(0.0);
    let minutes = MINUTES
        .captures(s)
        .and_then(|c| c[1].parse::<f64>().ok())
        .unwrap_or(0.0);

    hours + minutes / 60.0
}

/// Lenient numeric parsing: commas are decimal separators, anything other
/// than digits, `.` and `-` is dropped, and the longest numeric prefix of
/// the remainder is used (`"897,500"` → 897.5, `"1,234.5%"` → 1.234).
pub fn parse_number(s: &str) -> f64 {
    let cleaned: String = s
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    NUMBER_PREFIX
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Same as [`parse_number`] with a trailing `%` removed first.
pub fn parse_percentage(s: &str) -> f64 {
    parse_number(s.trim().trim_end_matches('%'))
}

/// `From: HH:MM:SS` ... `To: HH:MM:SS` anywhere in `text`.
pub fn parse_running_window(text: &str) -> Option<RunningTimeWindow> {
    let start = FROM_TIME.captures(text)?;
    let end = TO_TIME.captures(text)?;

    let start = NaiveTime::parse_from_str(&start[1], "%H:%M:%S").ok()?;
    let end = NaiveTime::parse_from_str(&end[1], "%H:%M:%S").ok()?;

    Some(RunningTimeWindow::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration_hours("2 hours 30 minutes"), 2.5);
        assert_eq!(parse_duration_hours("45 minutes"), 0.75);
        assert_eq!(parse_duration_hours("3 hours"), 3.0);
        assert_eq!(parse_duration_hours("1 hour 1 minute"), 1.0 + 1.0 / 60.0);
        assert_eq!(parse_duration_hours("8 Hours"), 8.0);
        assert_eq!(parse_duration_hours(""), 0.0);
        assert_eq!(parse_duration_hours("n/a"), 0.0);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number("897,500"), 897.5);
        assert_eq!(parse_number("-150.3"), -150.3);
        assert_eq!(parse_number("  12.0 "), 12.0);
        assert_eq!(parse_number("R 1 250"), 1250.0);
        assert_eq!(parse_number("1,234.5%"), 1.234);
        assert_eq!(parse_number("-"), 0.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
    }

    #[test]
    fn number_parsing_is_idempotent() {
        for raw in ["1,234.5%", "  12.0 ", "-", "-150.3", "45,2 L", ".5", "7-3"] {
            let once = parse_number(raw);
            assert_eq!(parse_number(&once.to_string()), once, "input {raw:?}");
        }
    }

    #[test]
    fn percentages() {
        assert_eq!(parse_percentage("85%"), 85.0);
        assert_eq!(parse_percentage("62,5 %"), 62.5);
        assert_eq!(parse_percentage(""), 0.0);
    }

    #[test]
    fn strict_dates() {
        assert_eq!(parse_strict_date("2026-01-20"), Some(d("2026-01-20")));
        assert_eq!(parse_strict_date("2026-02-30"), None);
        assert_eq!(parse_strict_date("2026-1-20"), None);
        assert_eq!(parse_strict_date("Total Hours"), None);
    }

    #[test]
    fn flexible_dates() {
        assert_eq!(parse_flexible_date("1/20/2026"), Some(d("2026-01-20")));
        assert_eq!(parse_flexible_date("1/20/26"), Some(d("2026-01-20")));
        assert_eq!(parse_flexible_date("20 January 2026"), Some(d("2026-01-20")));
        assert_eq!(parse_flexible_date("Jan 20, 2026"), Some(d("2026-01-20")));
        assert_eq!(
            parse_flexible_date("2026-01-20 00:00:00"),
            Some(d("2026-01-20"))
        );
        assert_eq!(parse_flexible_date("46042"), Some(d("2026-01-20")));
        assert_eq!(parse_flexible_date("Running Time"), None);
        assert_eq!(parse_flexible_date("12"), None);
    }

    #[test]
    fn dates_outside_range_are_rejected() {
        let range = DateRange::parse("2026-01-19:2026-01-21").unwrap();
        assert_eq!(parse_date_in_range("2026-01-18", &range), None);
        assert_eq!(
            parse_date_in_range("2026-01-19", &range),
            Some(d("2026-01-19"))
        );
        assert_eq!(
            parse_date_in_range("1/21/2026", &range),
            Some(d("2026-01-21"))
        );
        assert_eq!(parse_date_in_range("2026-01-22", &range), None);
    }

    #[test]
    fn running_windows() {
        let w = parse_running_window("Running Time From: 06:00:00 To: 14:30:15").unwrap();
        assert_eq!(w.start, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(w.end, NaiveTime::from_hms_opt(14, 30, 15).unwrap());

        assert!(parse_running_window("Running Time From: 06:00:00").is_none());
        assert!(parse_running_window("Running Time From: 06:00:00 To: 25:00:00").is_none());
    }
}
