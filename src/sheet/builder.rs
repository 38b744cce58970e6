//! Session builder: a single forward pass over classified rows.
//!
//! State carried between rows:
//! - the current site (last site marker, or the site cell of a data row)
//! - running-time windows seen before the session they belong to
//! - the sessions opened so far, keyed by (site, date) in creation order

use super::classify::{RowKind, classify};
use super::fields::{parse_duration_hours, parse_number, parse_percentage};
use super::fill::derive_fill_record;
use super::layout::ColumnRole;
use super::row::{Sheet, SheetRow};
use crate::models::{ImportBatch, RunningTimeWindow, SessionRecord, SessionStatus};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Counters for one pass; skipped rows are not errors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub rows: usize,
    pub site_markers: usize,
    pub running_times: usize,
    pub data_rows: usize,
    pub headers: usize,
    pub ignored: usize,
    pub skipped_out_of_range: usize,
    pub skipped_no_activity: usize,
    pub skipped_no_site: usize,
    /// Operating hours too large to place on the calendar.
    pub skipped_bad_hours: usize,
    pub duplicates: usize,
}

impl BuildStats {
    /// Data rows that did not become a session.
    pub fn skipped(&self) -> usize {
        self.skipped_out_of_range
            + self.skipped_no_activity
            + self.skipped_no_site
            + self.skipped_bad_hours
    }
}

/// An accepted session and, when fuel was added, its fill record.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltSession {
    pub session: SessionRecord,
    pub fill: Option<SessionRecord>,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub sessions: Vec<BuiltSession>,
    pub stats: BuildStats,
}

impl BuildOutput {
    /// Sessions plus fill records, i.e. the number of store inserts.
    pub fn record_count(&self) -> usize {
        self.sessions
            .iter()
            .map(|b| 1 + usize::from(b.fill.is_some()))
            .sum()
    }
}

/// Why a data row produced no session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowSkip {
    NoActivity,
    BadHours,
}

/// `start` plus `hours`, or `None` when the result is off the calendar.
fn end_after(start: NaiveDateTime, hours: f64) -> Option<NaiveDateTime> {
    let secs = (hours * 3600.0).round();
    if !secs.is_finite() || secs.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_seconds(secs as i64).and_then(|d| start.checked_add_signed(d))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SessionKey {
    site: String,
    date: NaiveDate,
}

impl SessionKey {
    fn new(site: &str, date: NaiveDate) -> Self {
        Self {
            site: site.trim().to_uppercase(),
            date,
        }
    }
}

#[derive(Debug)]
struct OpenSession {
    record: SessionRecord,
    windows: Vec<RunningTimeWindow>,
}

impl OpenSession {
    fn attach(&mut self, window: RunningTimeWindow) {
        let date = self.record.session_date;
        if self.windows.is_empty() {
            self.record.session_start_time = window.start_on(date);
        }
        self.record.session_end_time = window.end_on(date);
        self.windows.push(window);
    }

    fn finish(mut self) -> BuiltSession {
        if !self.windows.is_empty() {
            let labels: Vec<String> = self.windows.iter().map(RunningTimeWindow::label).collect();
            self.record.notes = format!("{} [{}]", self.record.notes, labels.join(", "));
        }

        let fill = derive_fill_record(&self.record);
        BuiltSession {
            session: self.record,
            fill,
        }
    }
}

pub struct SessionBuilder<'b> {
    batch: &'b ImportBatch,
    current_site: Option<String>,
    pending_windows: Vec<RunningTimeWindow>,
    open: Vec<OpenSession>,
    index: HashMap<SessionKey, usize>,
    /// Most recently built session per site (upper-cased site).
    last_touched: HashMap<String, usize>,
    stats: BuildStats,
}

impl<'b> SessionBuilder<'b> {
    pub fn new(batch: &'b ImportBatch) -> Self {
        Self {
            batch,
            current_site: None,
            pending_windows: Vec::new(),
            open: Vec::new(),
            index: HashMap::new(),
            last_touched: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn current_site(&self) -> Option<&str> {
        self.current_site.as_deref()
    }

    pub fn pending_windows(&self) -> &[RunningTimeWindow] {
        &self.pending_windows
    }

    /// Classify `row` and apply it.
    pub fn push(&mut self, row: &SheetRow<'_>) {
        let kind = classify(row);
        self.apply(row, kind);
    }

    pub fn apply(&mut self, row: &SheetRow<'_>, kind: RowKind) {
        self.stats.rows += 1;

        match kind {
            RowKind::SiteMarker(site) => {
                self.stats.site_markers += 1;
                self.current_site = Some(site);
                self.pending_windows.clear();
            }
            RowKind::RunningTime(window) => {
                self.stats.running_times += 1;
                self.on_running_time(window);
            }
            RowKind::DataRow(date) => {
                self.stats.data_rows += 1;
                self.on_data_row(row, date);
            }
            RowKind::Header => self.stats.headers += 1,
            RowKind::Ignorable => self.stats.ignored += 1,
        }
    }

    fn on_running_time(&mut self, window: RunningTimeWindow) {
        let target = self
            .current_site
            .as_deref()
            .and_then(|site| self.last_touched.get(&site.trim().to_uppercase()))
            .copied();

        match target {
            Some(idx) => self.open[idx].attach(window),
            None => self.pending_windows.push(window),
        }
    }

    fn on_data_row(&mut self, row: &SheetRow<'_>, date: NaiveDate) {
        // Positional reports repeat the site on every row; a different site
        // there starts a new block.
        let own_site = row.cell(ColumnRole::Site);
        if !own_site.is_empty()
            && !self
                .current_site
                .as_deref()
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(own_site))
        {
            self.current_site = Some(own_site.to_string());
            self.pending_windows.clear();
        }

        let Some(site) = self.current_site.clone() else {
            self.stats.skipped_no_site += 1;
            return;
        };

        if !self.batch.range.contains(date) {
            self.stats.skipped_out_of_range += 1;
            return;
        }

        let record = match self.build_record(row, site.trim(), date) {
            Ok(record) => record,
            Err(RowSkip::NoActivity) => {
                self.stats.skipped_no_activity += 1;
                return;
            }
            Err(RowSkip::BadHours) => {
                self.stats.skipped_bad_hours += 1;
                return;
            }
        };

        let mut session = OpenSession {
            record,
            windows: Vec::new(),
        };
        for window in std::mem::take(&mut self.pending_windows) {
            session.attach(window);
        }

        let key = SessionKey::new(&site, date);
        let idx = match self.index.get(&key) {
            Some(&idx) => {
                self.stats.duplicates += 1;
                self.open[idx] = session;
                idx
            }
            None => {
                self.open.push(session);
                let idx = self.open.len() - 1;
                self.index.insert(key.clone(), idx);
                idx
            }
        };
        self.last_touched.insert(key.site, idx);
    }

    /// Parse the numeric cells of a data row.
    fn build_record(
        &self,
        row: &SheetRow<'_>,
        site: &str,
        date: NaiveDate,
    ) -> Result<SessionRecord, RowSkip> {
        let hours = parse_duration_hours(row.cell(ColumnRole::OperatingHours));
        let total_usage = parse_number(row.cell(ColumnRole::TotalUsage)).abs();
        let total_fill = parse_number(row.cell(ColumnRole::TotalFill)).abs();

        if !(total_usage > 0.0 || total_fill > 0.0 || hours > 0.0) {
            return Err(RowSkip::NoActivity);
        }

        let sheet_lph = parse_number(row.cell(ColumnRole::LiterUsagePerHour));
        let liter_usage_per_hour = if sheet_lph != 0.0 {
            sheet_lph
        } else if hours > 0.0 {
            total_usage / hours
        } else {
            0.0
        };

        let sheet_cost = parse_number(row.cell(ColumnRole::CostForUsage));
        let cost_for_usage = if sheet_cost != 0.0 {
            sheet_cost
        } else {
            total_usage * self.batch.cost_per_liter
        };

        let start = date.and_time(self.batch.default_start);
        let end = end_after(start, hours).ok_or(RowSkip::BadHours)?;

        Ok(SessionRecord {
            branch: site.to_string(),
            company: self.batch.company.clone(),
            cost_code: self.batch.cost_codes.lookup(site).to_string(),
            session_date: date,
            session_start_time: start,
            session_end_time: end,
            operating_hours: hours,
            opening_percentage: parse_percentage(row.cell(ColumnRole::OpeningPercentage)),
            opening_fuel: parse_number(row.cell(ColumnRole::OpeningFuel)),
            closing_percentage: parse_percentage(row.cell(ColumnRole::ClosingPercentage)),
            closing_fuel: parse_number(row.cell(ColumnRole::ClosingFuel)),
            total_usage,
            total_fill,
            liter_usage_per_hour,
            cost_per_liter: self.batch.cost_per_liter,
            cost_for_usage,
            session_status: SessionStatus::Completed,
            notes: format!(
                "Imported from {} - {}",
                self.batch.source_name,
                date.format("%Y-%m-%d")
            ),
            source_file: self.batch.source_name.clone(),
        })
    }

    /// Flush open sessions in creation order.
    pub fn finish(self) -> BuildOutput {
        BuildOutput {
            sessions: self.open.into_iter().map(OpenSession::finish).collect(),
            stats: self.stats,
        }
    }
}

/// Run the builder over every data row of `sheet`.
pub fn build_sessions(sheet: &Sheet, batch: &ImportBatch) -> BuildOutput {
    sheet
        .data_rows()
        .fold(SessionBuilder::new(batch), |mut builder, row| {
            builder.push(&row);
            builder
        })
        .finish()
}
