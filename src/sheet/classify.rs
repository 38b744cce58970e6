//! Row classification. Every row gets exactly one kind; malformed rows are
//! `Ignorable`, never an error.

use super::fields::{parse_flexible_date, parse_running_window, parse_strict_date};
use super::layout::ColumnRole;
use super::row::SheetRow;
use crate::models::RunningTimeWindow;
use chrono::NaiveDate;

pub const SITE_MARKER: &str = "Total Running Hours";
pub const RUNNING_TIME: &str = "Running Time";
pub const TOTAL_HOURS: &str = "Total Hours";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Start of a site block; carries the site name.
    SiteMarker(String),
    RunningTime(RunningTimeWindow),
    DataRow(NaiveDate),
    Header,
    Ignorable,
}

impl RowKind {
    pub fn tag(&self) -> &'static str {
        match self {
            RowKind::SiteMarker(_) => "SITE_MARKER",
            RowKind::RunningTime(_) => "RUNNING_TIME",
            RowKind::DataRow(_) => "DATA_ROW",
            RowKind::Header => "HEADER",
            RowKind::Ignorable => "IGNORABLE",
        }
    }
}

/// Classify one row; the first matching rule wins.
pub fn classify(row: &SheetRow<'_>) -> RowKind {
    let site = row.cell(ColumnRole::Site);
    let label = row.cell(ColumnRole::Date);

    // Keyed reports put "<SITE> Total Running Hours" in the first column,
    // positional ones put the phrase in the second.
    if site.contains(SITE_MARKER) || label.contains(SITE_MARKER) {
        let name = site.replace(SITE_MARKER, "").trim().to_string();
        return if name.is_empty() {
            RowKind::Ignorable
        } else {
            RowKind::SiteMarker(name)
        };
    }

    if site.contains(RUNNING_TIME) || label.contains(RUNNING_TIME) {
        return match parse_running_window(&row.text()) {
            Some(w) => RowKind::RunningTime(w),
            None => RowKind::Ignorable,
        };
    }

    if is_header_pair(site, label) {
        return RowKind::Header;
    }

    if is_aggregate_label(site) || label.eq_ignore_ascii_case(TOTAL_HOURS) {
        return RowKind::Ignorable;
    }

    if let Some(date) = parse_strict_date(label) {
        return RowKind::DataRow(date);
    }

    // Legacy layout: any two leading cells, date written loosely.
    if !site.is_empty()
        && !label.is_empty()
        && !site.eq_ignore_ascii_case(ColumnRole::Site.label())
        && !label.eq_ignore_ascii_case(ColumnRole::Date.label())
    {
        return match parse_flexible_date(label) {
            Some(date) => RowKind::DataRow(date),
            None => RowKind::Ignorable,
        };
    }

    RowKind::Ignorable
}

fn is_header_pair(site: &str, label: &str) -> bool {
    site.eq_ignore_ascii_case(ColumnRole::Site.label())
        && label.eq_ignore_ascii_case(ColumnRole::Date.label())
}

/// Month names and "Total Hours" introduce monthly aggregate rows.
fn is_aggregate_label(cell: &str) -> bool {
    cell.eq_ignore_ascii_case(TOTAL_HOURS) || MONTHS.iter().any(|m| cell.eq_ignore_ascii_case(m))
}
