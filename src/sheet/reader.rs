//! Read the first (or a named) worksheet of a workbook into text cells.
//!
//! Spreadsheets go through calamine; `.csv` exports of a report are read
//! with the csv crate, without header inference.

use super::layout::SheetShape;
use super::row::Sheet;
use crate::errors::{AppError, AppResult};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Duration, NaiveDate, Timelike};
use std::path::Path;

const WORKBOOK_EXTENSIONS: [&str; 7] = ["xlsx", "xlsm", "xlsb", "xls", "xla", "ods", "csv"];

/// Load one worksheet. Any failure here is fatal for the import.
pub fn read_sheet(path: &Path, sheet_name: Option<&str>, shape: SheetShape) -> AppResult<Sheet> {
    if !path.exists() {
        return Err(AppError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("workbook not found: {}", path.display()),
        )));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::UnsupportedFormat(path.display().to_string()));
    }

    let (name, raw) = if ext == "csv" {
        read_csv_rows(path)?
    } else {
        read_workbook_rows(path, sheet_name)?
    };

    if raw.iter().all(|r| r.iter().all(|c| c.trim().is_empty())) {
        return Err(AppError::EmptySheet(name));
    }

    Ok(Sheet::new(&name, shape, raw))
}

fn read_csv_rows(path: &Path) -> AppResult<(String, Vec<Vec<String>>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    // Exports are often Windows-1252; undecodable bytes become U+FFFD.
    let mut rows = Vec::new();
    for record in rdr.byte_records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|c| String::from_utf8_lossy(c).into_owned())
                .collect(),
        );
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "csv".to_string());

    Ok((name, rows))
}

fn read_workbook_rows(
    path: &Path,
    sheet_name: Option<&str>,
) -> AppResult<(String, Vec<Vec<String>>)> {
    let mut workbook = open_workbook_auto(path)?;

    let name = match sheet_name {
        Some(n) => n.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| AppError::EmptySheet(path.display().to_string()))?,
    };

    let range = workbook.worksheet_range(&name)?;

    // calamine ranges begin at the first used cell; pad back to A1 so that
    // positional addressing matches the sheet.
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for r in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(r.iter().map(cell_text));
        rows.push(cells);
    }

    Ok((name, rows))
}

/// Render a cell the way it reads in the sheet.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::DateTime(dt) => excel_datetime_text(dt.as_f64(), dt.is_duration()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

/// Excel stores dates as days since 1899-12-30 and times as day fractions.
fn excel_datetime_text(value: f64, is_duration: bool) -> String {
    let secs = (value * 86_400.0).round();
    if !secs.is_finite() || secs.abs() >= i64::MAX as f64 {
        return value.to_string();
    }
    let secs = secs as i64;

    if is_duration {
        let mins = secs / 60;
        return format!("{} hours {} minutes", mins / 60, mins % 60);
    }

    let Some(ndt) = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .zip(Duration::try_seconds(secs))
        .and_then(|(epoch, d)| epoch.checked_add_signed(d))
    else {
        return value.to_string();
    };

    if value < 1.0 {
        ndt.format("%H:%M:%S").to_string()
    } else if ndt.num_seconds_from_midnight() == 0 {
        ndt.format("%Y-%m-%d").to_string()
    } else {
        ndt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::layout::ColumnRole;

    #[test]
    fn plain_cells_render_as_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("ALEX".into())), "ALEX");
        assert_eq!(cell_text(&Data::Float(120.0)), "120");
        assert_eq!(cell_text(&Data::Float(-150.3)), "-150.3");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn excel_serials_render_as_dates_times_and_durations() {
        assert_eq!(excel_datetime_text(46042.0, false), "2026-01-20");
        assert_eq!(excel_datetime_text(0.25, false), "06:00:00");
        assert_eq!(excel_datetime_text(46042.5, false), "2026-01-20 12:00:00");
        assert_eq!(excel_datetime_text(0.3125, true), "7 hours 30 minutes");
    }

    #[test]
    fn out_of_calendar_serials_fall_back_to_the_number() {
        assert_eq!(excel_datetime_text(1e300, false), 1e300_f64.to_string());
        assert_eq!(excel_datetime_text(1e12, false), 1e12_f64.to_string());
        assert_eq!(excel_datetime_text(f64::NAN, false), "NaN");
    }

    #[test]
    fn missing_workbook_is_an_io_error() {
        let err = read_sheet(
            Path::new("/nonexistent/Weekly (99).xlsx"),
            None,
            SheetShape::Keyed,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = std::env::temp_dir().join("rfuelimport_reader_notes.txt");
        std::fs::write(&path, "ALEX,2026-01-20").unwrap();
        let err = read_sheet(&path, None, SheetShape::Positional).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn non_utf8_csv_cells_are_read_lossily() {
        let path = std::env::temp_dir().join("rfuelimport_reader_cp1252.csv");
        std::fs::write(
            &path,
            b"Site,Date,Operating Hours\nALEX,2026-01-19,1 hours\nCaf\xE9,2026-01-20,2 hours\n",
        )
        .unwrap();

        let sheet = read_sheet(&path, None, SheetShape::Positional).unwrap();
        let row = sheet.data_rows().nth(1).unwrap();
        assert_eq!(row.cell(ColumnRole::Site), "Caf\u{FFFD}");
        assert_eq!(row.cell(ColumnRole::OperatingHours), "2 hours");
        assert_eq!(row.number, 3);
    }
}
