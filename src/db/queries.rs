use crate::errors::{AppError, AppResult};
use crate::models::session::parse_timestamp;
use crate::models::{DateRange, SessionRecord, SessionStatus, StoredSession};
use chrono::{Local, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{Connection, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<StoredSession> {
    let date_str: String = row.get("session_date")?;
    let session_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    let start_str: String = row.get("session_start_time")?;
    let session_start_time = parse_timestamp(&start_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidTime(start_str.clone())))?;

    let end_str: String = row.get("session_end_time")?;
    let session_end_time = parse_timestamp(&end_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidTime(end_str.clone())))?;

    let status_str: String = row.get("session_status")?;
    let session_status = SessionStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            0,
            AppError::Other(format!("Invalid session status: {}", status_str)),
        )
    })?;

    Ok(StoredSession {
        id: row.get("id")?,
        record: SessionRecord {
            branch: row.get("branch")?,
            company: row.get("company")?,
            cost_code: row.get("cost_code")?,
            session_date,
            session_start_time,
            session_end_time,
            operating_hours: row.get("operating_hours")?,
            opening_percentage: row.get("opening_percentage")?,
            opening_fuel: row.get("opening_fuel")?,
            closing_percentage: row.get("closing_percentage")?,
            closing_fuel: row.get("closing_fuel")?,
            total_usage: row.get("total_usage")?,
            total_fill: row.get("total_fill")?,
            liter_usage_per_hour: row.get("liter_usage_per_hour")?,
            cost_per_liter: row.get("cost_per_liter")?,
            cost_for_usage: row.get("cost_for_usage")?,
            session_status,
            notes: row.get("notes")?,
            source_file: row.get("source_file")?,
        },
    })
}

/// Insert one record and return its row id.
pub fn insert_session(conn: &Connection, s: &SessionRecord) -> AppResult<i64> {
    if s.branch.trim().is_empty() {
        return Err(AppError::Store(format!(
            "refusing to store a session without branch ({})",
            s.date_str()
        )));
    }

    conn.execute(
        "INSERT INTO operating_sessions (
            branch, company, cost_code, session_date, session_start_time, session_end_time,
            operating_hours, opening_percentage, opening_fuel, closing_percentage, closing_fuel,
            total_usage, total_fill, liter_usage_per_hour, cost_per_liter, cost_for_usage,
            session_status, notes, source_file, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        params![
            s.branch,
            s.company,
            s.cost_code,
            s.date_str(),
            s.start_str(),
            s.end_str(),
            s.operating_hours,
            s.opening_percentage,
            s.opening_fuel,
            s.closing_percentage,
            s.closing_fuel,
            s.total_usage,
            s.total_fill,
            s.liter_usage_per_hour,
            s.cost_per_liter,
            s.cost_for_usage,
            s.session_status.to_db_str(),
            s.notes,
            s.source_file,
            Local::now().to_rfc3339(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Remove every stored session (any branch) whose date falls in the range.
pub fn delete_sessions_in_range(conn: &Connection, range: &DateRange) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM operating_sessions WHERE session_date BETWEEN ?1 AND ?2",
        params![range.start_str(), range.end_str()],
    )?;
    Ok(n)
}

pub fn load_sessions(
    conn: &Connection,
    range: Option<&DateRange>,
    branch: Option<&str>,
) -> AppResult<Vec<StoredSession>> {
    let (start, end) = match range {
        Some(r) => (r.start_str(), r.end_str()),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };
    let branch = branch.map(|b| b.trim().to_uppercase());

    let mut stmt = conn.prepare(
        "SELECT * FROM operating_sessions
         WHERE session_date BETWEEN ?1 AND ?2
           AND (?3 IS NULL OR UPPER(branch) = ?3)
         ORDER BY session_date ASC, branch ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![start, end, branch], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
