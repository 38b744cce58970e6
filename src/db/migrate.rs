use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `operating_sessions` table.
fn create_sessions_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS operating_sessions (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            branch               TEXT NOT NULL CHECK(branch <> ''),
            company              TEXT NOT NULL,
            cost_code            TEXT NOT NULL,
            session_date         TEXT NOT NULL,
            session_start_time   TEXT NOT NULL,
            session_end_time     TEXT NOT NULL,
            operating_hours      REAL NOT NULL DEFAULT 0,
            opening_percentage   REAL NOT NULL DEFAULT 0,
            opening_fuel         REAL NOT NULL DEFAULT 0,
            closing_percentage   REAL NOT NULL DEFAULT 0,
            closing_fuel         REAL NOT NULL DEFAULT 0,
            total_usage          REAL NOT NULL DEFAULT 0,
            total_fill           REAL NOT NULL DEFAULT 0,
            liter_usage_per_hour REAL NOT NULL DEFAULT 0,
            cost_per_liter       REAL NOT NULL DEFAULT 0,
            cost_for_usage       REAL NOT NULL DEFAULT 0,
            session_status       TEXT NOT NULL
                CHECK(session_status IN ('COMPLETED','FUEL_FILL_COMPLETED')),
            notes                TEXT NOT NULL DEFAULT '',
            created_at           TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_date ON operating_sessions(session_date);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Track the workbook each record came from.
fn migrate_add_source_file(conn: &Connection) -> Result<()> {
    let version = "20260120_0001_add_source_file";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "operating_sessions", "source_file")? {
        conn.execute_batch(
            r#"
            ALTER TABLE operating_sessions ADD COLUMN source_file TEXT NOT NULL DEFAULT '';
            CREATE INDEX IF NOT EXISTS idx_sessions_branch_date
                ON operating_sessions(branch, session_date);
            "#,
        )?;
    }

    mark_applied(conn, version, "Added source_file to operating_sessions")?;
    success(format!(
        "Migration applied: {} → added 'source_file' to operating_sessions",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "operating_sessions")? {
        create_sessions_table(conn)?;
    }

    migrate_add_source_file(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        assert!(column_exists(&conn, "operating_sessions", "source_file").unwrap());
        let marks: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(marks, 1);
    }
}
