use super::cost_code::CostCodeTable;
use super::date_range::DateRange;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_time;
use chrono::NaiveTime;
use std::path::Path;

/// Per-import settings shared by every record built from one sheet.
#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub range: DateRange,
    pub source_name: String,
    pub company: String,
    pub cost_per_liter: f64,
    pub cost_codes: CostCodeTable,
    /// Start time used when a session has no running-time window.
    pub default_start: NaiveTime,
}

impl ImportBatch {
    pub fn from_config(
        cfg: &Config,
        range: DateRange,
        source: &Path,
        company: Option<&str>,
        rate: Option<f64>,
    ) -> AppResult<Self> {
        let default_start = parse_time(&cfg.default_start_time)
            .ok_or_else(|| AppError::InvalidTime(cfg.default_start_time.clone()))?;

        let cost_per_liter = rate.unwrap_or(cfg.cost_per_liter);
        if !cost_per_liter.is_finite() || cost_per_liter < 0.0 {
            return Err(AppError::Config(format!(
                "cost per liter must be a non-negative number, got {}",
                cost_per_liter
            )));
        }

        let source_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| source.display().to_string());

        Ok(Self {
            range,
            source_name,
            company: company.unwrap_or(&cfg.company).trim().to_string(),
            cost_per_liter,
            cost_codes: CostCodeTable::new(&cfg.cost_codes, &cfg.default_cost_code),
            default_start,
        })
    }
}
