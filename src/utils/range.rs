// src/utils/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse --range (year / month / day / interval) into inclusive bounds.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(invalid(r, "start and end must have same format"));
        }

        let (d1, _) = period_bounds(start).ok_or_else(|| invalid(r, "invalid start"))?;
        let (_, d2) = period_bounds(end).ok_or_else(|| invalid(r, "invalid end"))?;
        Ok((d1, d2))
    } else {
        period_bounds(r).ok_or_else(|| invalid(r, "unsupported --range format"))
    }
}

/// First and last day of a single YYYY / YYYY-MM / YYYY-MM-DD period.
fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        // YYYY-MM
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").ok()?;
            Some((first, month_last_day(first)?))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidRange(format!("'{}': {}", r, why))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_day() {
        assert_eq!(
            parse_range("2026-01-20").unwrap(),
            (d("2026-01-20"), d("2026-01-20"))
        );
    }

    #[test]
    fn day_interval() {
        assert_eq!(
            parse_range("2026-01-13:2026-01-19").unwrap(),
            (d("2026-01-13"), d("2026-01-19"))
        );
    }

    #[test]
    fn month_interval_ends_on_last_day() {
        assert_eq!(
            parse_range("2024-01:2024-02").unwrap(),
            (d("2024-01-01"), d("2024-02-29"))
        );
        assert_eq!(
            parse_range("2025-12").unwrap(),
            (d("2025-12-01"), d("2025-12-31"))
        );
    }

    #[test]
    fn mixed_formats_are_rejected() {
        assert!(parse_range("2026:2026-01").is_err());
        assert!(parse_range("20-01").is_err());
        assert!(parse_range("2026-13").is_err());
    }
}
