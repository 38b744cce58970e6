use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::DateRange;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { range, branch } = cmd {
        let range = range.as_deref().map(DateRange::parse).transpose()?;
        let mut pool = DbPool::open_ready(&cfg.database)?;

        ListLogic::print(
            &mut pool,
            range.as_ref(),
            branch.as_deref(),
            separator(cfg),
        )?;
    }

    Ok(())
}

pub(crate) fn separator(cfg: &Config) -> char {
    cfg.separator_char.chars().next().unwrap_or('-')
}
