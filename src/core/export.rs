use crate::db::pool::DbPool;
use crate::db::queries::load_sessions;
use crate::errors::{AppError, AppResult};
use crate::models::{DateRange, StoredSession};
use crate::ui::messages::{info, success, warning};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Flat CSV row; column names follow the `operating_sessions` table.
#[derive(Serialize, Debug)]
struct SessionCsvRow<'a> {
    id: i64,
    branch: &'a str,
    company: &'a str,
    cost_code: &'a str,
    session_date: String,
    session_start_time: String,
    session_end_time: String,
    operating_hours: f64,
    opening_percentage: f64,
    opening_fuel: f64,
    closing_percentage: f64,
    closing_fuel: f64,
    total_usage: f64,
    total_fill: f64,
    liter_usage_per_hour: f64,
    cost_per_liter: f64,
    cost_for_usage: f64,
    session_status: &'static str,
    notes: &'a str,
    source_file: &'a str,
}

impl<'a> From<&'a StoredSession> for SessionCsvRow<'a> {
    fn from(s: &'a StoredSession) -> Self {
        let r = &s.record;
        Self {
            id: s.id,
            branch: &r.branch,
            company: &r.company,
            cost_code: &r.cost_code,
            session_date: r.date_str(),
            session_start_time: r.start_str(),
            session_end_time: r.end_str(),
            operating_hours: r.operating_hours,
            opening_percentage: r.opening_percentage,
            opening_fuel: r.opening_fuel,
            closing_percentage: r.closing_percentage,
            closing_fuel: r.closing_fuel,
            total_usage: r.total_usage,
            total_fill: r.total_fill,
            liter_usage_per_hour: r.liter_usage_per_hour,
            cost_per_liter: r.cost_per_liter,
            cost_for_usage: r.cost_for_usage,
            session_status: r.session_status.to_db_str(),
            notes: &r.notes,
            source_file: &r.source_file,
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export stored sessions, optionally limited to a range and a branch.
    /// Returns the number of sessions written.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &Path,
        range: Option<&DateRange>,
        branch: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        ensure_writable(file, force)?;

        let sessions = load_sessions(&pool.conn, range, branch)?;

        if sessions.is_empty() {
            warning("No sessions found for the selected range. Nothing to export.");
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => write_csv(file, &sessions)?,
            ExportFormat::Json => write_json(file, &sessions)?,
        }

        success(format!(
            "{} export completed: {} ({} sessions)",
            format.as_str().to_uppercase(),
            file.display(),
            sessions.len()
        ));

        Ok(sessions.len())
    }
}

pub fn write_csv(path: &Path, sessions: &[StoredSession]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for s in sessions {
        wtr.serialize(SessionCsvRow::from(s))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json(path: &Path, sessions: &[StoredSession]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(sessions)
        .map_err(|e| AppError::Export(format!("JSON serialization failed: {}", e)))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Existing files are only replaced with `force` or after confirmation.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}
