use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::DateRange;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        branch,
        force,
    } = cmd
    {
        let range = range.as_deref().map(DateRange::parse).transpose()?;
        let path = expand_tilde(file);
        let mut pool = DbPool::open_ready(&cfg.database)?;

        ExportLogic::export(
            &mut pool,
            *format,
            &path,
            range.as_ref(),
            branch.as_deref(),
            *force,
        )?;
    }

    Ok(())
}
