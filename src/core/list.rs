use crate::db::pool::DbPool;
use crate::db::queries::load_sessions;
use crate::errors::AppResult;
use crate::models::{DateRange, StoredSession};
use crate::utils::colors::{CYAN, RESET, color_for_amount, color_for_status};
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_liters, fmt_number, hours2readable};

pub struct ListLogic;

impl ListLogic {
    pub fn print(
        pool: &mut DbPool,
        range: Option<&DateRange>,
        branch: Option<&str>,
        separator: char,
    ) -> AppResult<usize> {
        let sessions = load_sessions(&pool.conn, range, branch)?;

        let scope = match range {
            Some(r) => r.to_string(),
            None => "all dates".to_string(),
        };

        if sessions.is_empty() {
            println!("⚠️  No sessions stored for {}.", scope);
            return Ok(0);
        }

        println!("📅 Sessions for {}:\n", scope);
        print!("{}", session_table(&sessions).render(separator));

        let usage: f64 = sessions
            .iter()
            .filter(|s| !s.record.is_fill())
            .map(|s| s.record.total_usage)
            .sum();
        let fill: f64 = sessions
            .iter()
            .filter(|s| s.record.is_fill())
            .map(|s| s.record.total_fill)
            .sum();
        let cost: f64 = sessions.iter().map(|s| s.record.cost_for_usage).sum();

        println!(
            "\n{}Σ{} usage {}{}{}  fill {}{}{}  cost {}",
            CYAN,
            RESET,
            color_for_status(false),
            fmt_liters(usage),
            RESET,
            color_for_amount(fill),
            fmt_liters(fill),
            RESET,
            fmt_number(cost)
        );

        Ok(sessions.len())
    }
}

fn session_table(sessions: &[StoredSession]) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Site"),
        Column::left("Status"),
        Column::left("Start"),
        Column::left("End"),
        Column::right("Hours"),
        Column::right("Usage"),
        Column::right("Fill"),
        Column::right("L/h"),
        Column::right("Cost"),
    ]);

    for s in sessions {
        let r = &s.record;
        table.add_row(vec![
            s.id.to_string(),
            r.date_str(),
            r.branch.clone(),
            r.session_status.to_db_str().to_string(),
            r.session_start_time.format("%H:%M").to_string(),
            r.session_end_time.format("%H:%M").to_string(),
            hours2readable(r.operating_hours),
            fmt_liters(r.total_usage),
            fmt_liters(r.total_fill),
            fmt_number(r.liter_usage_per_hour),
            fmt_number(r.cost_for_usage),
        ]);
    }

    table
}
