use crate::cli::commands::list::separator;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::inspect::InspectLogic;
use crate::errors::AppResult;
use crate::models::DateRange;
use crate::sheet::read_sheet;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Inspect {
        file,
        layout,
        sheet,
        range,
        rows,
    } = cmd
    {
        let range = range.as_deref().map(DateRange::parse).transpose()?;
        let path = expand_tilde(file);
        let sheet = read_sheet(&path, sheet.as_deref(), *layout)?;

        InspectLogic::print(&sheet, range.as_ref(), *rows, separator(cfg));
    }

    Ok(())
}
