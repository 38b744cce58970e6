use crate::db::store::SessionStore;
use crate::errors::{AppError, AppResult};
use crate::models::{ImportBatch, SessionRecord};
use crate::sheet::{BuildStats, Sheet, build_sessions};
use crate::ui::messages::{fuel, info, warning};
use crate::utils::{fmt_liters, hours2readable};

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Skip the pre-import delete of the batch range.
    pub keep_existing: bool,
    /// Treat a failed pre-import delete as fatal.
    pub abort_on_delete_failure: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Rows removed by the pre-import delete (`None` when it did not run).
    pub deleted: Option<usize>,
    pub sessions_inserted: usize,
    pub fills_inserted: usize,
    /// Records the store refused.
    pub failed: usize,
    /// Fill records dropped because their parent session was refused.
    pub suppressed_fills: usize,
    pub stats: BuildStats,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.sessions_inserted + self.fills_inserted
    }

    /// Data rows dropped by the builder plus records the store refused.
    pub fn skipped(&self) -> usize {
        self.stats.skipped() + self.failed + self.suppressed_fills
    }
}

/// High-level logic for the `import` command.
pub struct ImportLogic;

impl ImportLogic {
    pub fn apply<S: SessionStore>(
        store: &mut S,
        sheet: &Sheet,
        batch: &ImportBatch,
        opts: &ImportOptions,
    ) -> AppResult<ImportSummary> {
        let built = build_sessions(sheet, batch);

        let mut summary = ImportSummary {
            stats: built.stats.clone(),
            ..Default::default()
        };

        if !opts.keep_existing {
            match store.delete_sessions_in_range(&batch.range) {
                Ok(n) => {
                    summary.deleted = Some(n);
                    if n > 0 {
                        info(format!("Removed {} existing session(s) in {}", n, batch.range));
                    }
                }
                Err(e) if opts.abort_on_delete_failure => {
                    return Err(AppError::Store(format!(
                        "could not clear {} before import: {}",
                        batch.range, e
                    )));
                }
                Err(e) => {
                    warning(format!(
                        "Could not clear {} before import, continuing: {}",
                        batch.range, e
                    ));
                }
            }
        }

        for b in &built.sessions {
            match store.insert_session(&b.session) {
                Ok(_) => {
                    summary.sessions_inserted += 1;
                    fuel(describe(&b.session));
                }
                Err(e) => {
                    summary.failed += 1;
                    if b.fill.is_some() {
                        summary.suppressed_fills += 1;
                    }
                    warning(format!(
                        "Skipped session {}: {}",
                        b.session.identity(),
                        e
                    ));
                    continue;
                }
            }

            if let Some(fill) = &b.fill {
                match store.insert_session(fill) {
                    Ok(_) => {
                        summary.fills_inserted += 1;
                        fuel(describe(fill));
                    }
                    Err(e) => {
                        summary.failed += 1;
                        warning(format!("Skipped fill record {}: {}", fill.identity(), e));
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Build and print the records an import would write.
    pub fn dry_run(sheet: &Sheet, batch: &ImportBatch) -> ImportSummary {
        let built = build_sessions(sheet, batch);

        for b in &built.sessions {
            fuel(describe(&b.session));
            if let Some(fill) = &b.fill {
                fuel(describe(fill));
            }
        }
        info(format!(
            "Dry run: {} record(s) would be imported from '{}'",
            built.record_count(),
            batch.source_name
        ));

        ImportSummary {
            stats: built.stats,
            ..Default::default()
        }
    }
}

fn describe(s: &SessionRecord) -> String {
    if s.is_fill() {
        format!("{}  fill {}", s.identity(), fmt_liters(s.total_fill))
    } else {
        format!(
            "{}  {}  usage {}",
            s.identity(),
            hours2readable(s.operating_hours),
            fmt_liters(s.total_usage)
        )
    }
}
