use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ImportLogic, ImportOptions, ImportSummary};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{DateRange, ImportBatch};
use crate::sheet::{SheetShape, read_sheet};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::path::expand_tilde;

/// Handle the `import` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        file,
        range,
        layout,
        sheet,
        rate,
        company,
        keep_existing,
        dry_run,
    } = cmd
    {
        let path = expand_tilde(file);
        let range = DateRange::parse(range)?;
        let batch = ImportBatch::from_config(cfg, range, &path, company.as_deref(), *rate)?;

        header(format!("Import {} ({})", batch.source_name, batch.range));

        // Read failures abort before anything is written.
        let sheet = read_sheet(&path, sheet.as_deref(), *layout)?;
        info(format!(
            "Sheet '{}' read: {} rows, {} layout",
            sheet.name,
            sheet.len(),
            layout.as_str()
        ));
        if *layout == SheetShape::Positional && !sheet.has_header() {
            warning("No 'Site | Date' header row found, processing from the first row");
        }

        if *dry_run {
            let summary = ImportLogic::dry_run(&sheet, &batch);
            print_stats(&summary);
            return Ok(());
        }

        let opts = ImportOptions {
            keep_existing: *keep_existing,
            abort_on_delete_failure: cfg.abort_on_delete_failure,
        };

        let mut pool = DbPool::open_ready(&cfg.database)?;

        let summary = match ImportLogic::apply(&mut pool, &sheet, &batch, &opts) {
            Ok(s) => s,
            Err(e) => {
                ttlog_quiet(&pool.conn, "import_failed", &batch.source_name, &e.to_string());
                return Err(e);
            }
        };

        if let Some(n) = summary.deleted {
            ttlog_quiet(
                &pool.conn,
                "delete",
                &batch.range.to_string(),
                &format!("Removed {} session(s) before importing {}", n, batch.source_name),
            );
        }

        let line = format!(
            "{} sessions imported, {} skipped",
            summary.imported(),
            summary.skipped()
        );
        ttlog_quiet(
            &pool.conn,
            "import",
            &batch.source_name,
            &format!("{} ({})", line, batch.range),
        );

        print_stats(&summary);
        success(line);
    }

    Ok(())
}

fn print_stats(summary: &ImportSummary) {
    let s = &summary.stats;
    println!(
        "📊 rows {} | site markers {} | running times {} | data rows {} | headers {} | ignored {}",
        s.rows, s.site_markers, s.running_times, s.data_rows, s.headers, s.ignored
    );
    println!(
        "   skipped: out of range {} | no activity {} | no site {} | bad hours {} | duplicates {} | refused {}",
        s.skipped_out_of_range,
        s.skipped_no_activity,
        s.skipped_no_site,
        s.skipped_bad_hours,
        s.duplicates,
        summary.failed + summary.suppressed_fills
    );
}
