#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with HOME pointed at a scratch dir so that no real
/// configuration is read or written.
pub fn rfi() -> Command {
    let mut home = env::temp_dir();
    home.push("rfuelimport_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("rfuelimport");
    cmd.env("HOME", &home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rfuelimport.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `--test init` against `db_path`.
pub fn init_db(db_path: &str) {
    rfi()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Weekly report in the keyed layout:
/// ALEX on 2026-01-20 (one running window), BERGBRON on 2026-01-21 with a
/// 50 L fill, and a BERGBRON row on 2026-01-25 outside 2026-01-19:2026-01-21.
pub fn write_weekly_xlsx(name: &str) -> String {
    let path = temp_out(name, "xlsx");
    build_weekly_xlsx(&path).expect("write weekly workbook");
    path
}

fn build_weekly_xlsx(path: &str) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "FUEL REPORT SUMMARY")?;

    sheet.write_string(1, 0, "ALEX Total Running Hours")?;
    sheet.write_string(2, 0, "Running Time From: 06:00:00 To: 14:00:00")?;
    write_data_row(sheet, 3, "ALEX", "2026-01-20", "8 hours", -120.0, 0.0)?;

    sheet.write_string(4, 0, "BERGBRON Total Running Hours")?;
    write_data_row(sheet, 5, "BERGBRON", "2026-01-21", "2 hours 30 minutes", -30.0, 50.0)?;
    write_data_row(sheet, 6, "BERGBRON", "2026-01-25", "3 hours", -10.0, 0.0)?;

    sheet.write_string(7, 0, "Total Hours")?;
    sheet.write_string(7, 2, "13 hours 30 minutes")?;

    workbook.save(path)?;
    Ok(())
}

fn write_data_row(
    sheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    site: &str,
    date: &str,
    hours: &str,
    usage: f64,
    fill: f64,
) -> Result<(), XlsxError> {
    sheet.write_string(row, 0, site)?;
    sheet.write_string(row, 1, date)?;
    sheet.write_string(row, 2, hours)?;
    sheet.write_string(row, 3, "45%")?;
    sheet.write_number(row, 4, 200.0)?;
    sheet.write_string(row, 5, "30%")?;
    sheet.write_number(row, 6, 140.0)?;
    sheet.write_number(row, 7, usage)?;
    sheet.write_number(row, 8, fill)?;
    Ok(())
}

/// Daily report in the positional layout, exported as CSV: one ALEX
/// session with a 06:00-10:00 window and an idle BERGBRON row.
pub fn write_daily_csv(name: &str) -> String {
    let path = temp_out(name, "csv");
    let rows: [&[&str]; 6] = [
        &["Daily Fuel Report"],
        &[
            "Site",
            "Date",
            "Operating Hours",
            "Opening Percentage",
            "Opening Fuel",
            "Closing Percentage",
            "Closing Fuel",
            "Total Usage",
            "Total Fill",
            "Liter Usage Per Hour",
            "Cost For Usage",
        ],
        &["ALEX", "2026-01-20", "4 hours", "80%", "900", "70%", "800", "-100", "0", "", ""],
        &["ALEX", "Running Time", "From: 06:00:00", "To: 10:00:00"],
        &["ALEX", "Total Running Hours", "4 hours"],
        &["BERGBRON", "2026-01-20", "0 hours", "", "", "", "", "0", "0", "", ""],
    ];

    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&path)
        .expect("create csv");
    for r in rows {
        wtr.write_record(r).expect("write csv row");
    }
    wtr.flush().expect("flush csv");
    path
}

/// Stored sessions as (branch, status) in id order.
pub fn stored(db_path: &str) -> Vec<(String, String)> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare("SELECT branch, session_status FROM operating_sessions ORDER BY id")
        .expect("prepare");
    stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect()
}
