use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{
    init_db, rfi, setup_test_db, stored, temp_out, write_daily_csv, write_weekly_xlsx,
};

const WEEK: &str = "2026-01-19:2026-01-21";

fn import(db_path: &str, file: &str, extra: &[&str]) -> assert_cmd::assert::Assert {
    let mut args = vec!["--db", db_path, "import", file, "--range", WEEK];
    args.extend_from_slice(extra);
    rfi().args(args).assert()
}

#[test]
fn test_import_weekly_xlsx() {
    let db_path = setup_test_db("import_weekly_xlsx");
    let xlsx = write_weekly_xlsx("import_weekly_xlsx");
    init_db(&db_path);

    import(&db_path, &xlsx, &[])
        .success()
        .stdout(contains("3 sessions imported, 1 skipped"))
        .stdout(contains("ALEX 2026-01-20"))
        .stdout(contains("BERGBRON 2026-01-21"));

    assert_eq!(
        stored(&db_path),
        vec![
            ("ALEX".to_string(), "COMPLETED".to_string()),
            ("BERGBRON".to_string(), "COMPLETED".to_string()),
            ("BERGBRON".to_string(), "FUEL_FILL_COMPLETED".to_string()),
        ]
    );

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let (start, end, hours, usage, notes, code): (String, String, f64, f64, String, String) = conn
        .query_row(
            "SELECT session_start_time, session_end_time, operating_hours, total_usage, notes, cost_code
             FROM operating_sessions WHERE branch = 'ALEX'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?)),
        )
        .unwrap();
    assert_eq!(start, "2026-01-20T06:00:00Z");
    assert_eq!(end, "2026-01-20T14:00:00Z");
    assert_eq!(hours, 8.0);
    assert_eq!(usage, 120.0);
    assert_eq!(code, "KFC-0001-0001-0001");
    assert!(notes.ends_with("2026-01-20 [06:00:00-14:00:00]"));

    let (closing, fill_notes): (f64, String) = conn
        .query_row(
            "SELECT closing_fuel, notes FROM operating_sessions
             WHERE session_status = 'FUEL_FILL_COMPLETED'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(closing, 250.0);
    assert!(fill_notes.starts_with("Fuel fill: 50L. Imported from"));
}

#[test]
fn test_reimport_replaces_range() {
    let db_path = setup_test_db("reimport_replaces_range");
    let xlsx = write_weekly_xlsx("reimport_replaces_range");
    init_db(&db_path);

    import(&db_path, &xlsx, &[]).success();
    import(&db_path, &xlsx, &[])
        .success()
        .stdout(contains("Removed 3 existing session(s)"));

    assert_eq!(stored(&db_path).len(), 3);
}

#[test]
fn test_keep_existing_appends() {
    let db_path = setup_test_db("keep_existing_appends");
    let xlsx = write_weekly_xlsx("keep_existing_appends");
    init_db(&db_path);

    import(&db_path, &xlsx, &[]).success();
    import(&db_path, &xlsx, &["--keep-existing"]).success();

    assert_eq!(stored(&db_path).len(), 6);
}

#[test]
fn test_dry_run_writes_nothing() {
    let db_path = setup_test_db("dry_run_writes_nothing");
    let xlsx = write_weekly_xlsx("dry_run_writes_nothing");
    init_db(&db_path);

    import(&db_path, &xlsx, &["--dry-run"])
        .success()
        .stdout(contains("Dry run: 3 record(s)"))
        .stdout(contains("sessions imported").not());

    assert!(stored(&db_path).is_empty());
}

#[test]
fn test_import_positional_csv() {
    let db_path = setup_test_db("import_positional_csv");
    let csv = write_daily_csv("import_positional_csv");
    init_db(&db_path);

    import(&db_path, &csv, &["--layout", "positional", "--rate", "19.44"])
        .success()
        .stdout(contains("1 sessions imported, 1 skipped"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let (start, end, rate, notes): (String, String, f64, String) = conn
        .query_row(
            "SELECT session_start_time, session_end_time, cost_per_liter, notes
             FROM operating_sessions",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(start, "2026-01-20T06:00:00Z");
    assert_eq!(end, "2026-01-20T10:00:00Z");
    assert_eq!(rate, 19.44);
    assert!(notes.ends_with("[06:00:00-10:00:00]"));
}

#[test]
fn test_import_missing_file_fails() {
    let db_path = setup_test_db("import_missing_file_fails");
    let missing = temp_out("import_missing_file_fails", "xlsx");
    init_db(&db_path);

    import(&db_path, &missing, &[])
        .failure()
        .stderr(contains("Error:"));

    assert!(stored(&db_path).is_empty());
}

#[test]
fn test_import_rejects_bad_range() {
    let db_path = setup_test_db("import_rejects_bad_range");
    let xlsx = write_weekly_xlsx("import_rejects_bad_range");

    rfi()
        .args(["--db", &db_path, "import", &xlsx, "--range", "2026-01-21:2026-01-19"])
        .assert()
        .failure()
        .stderr(contains("Invalid date range"));
}

#[test]
fn test_import_is_logged() {
    let db_path = setup_test_db("import_is_logged");
    let xlsx = write_weekly_xlsx("import_is_logged");
    init_db(&db_path);

    import(&db_path, &xlsx, &[]).success();

    rfi()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("import_is_logged_out.xlsx"))
        .stdout(contains("3 sessions imported, 1 skipped"));
}
