use crate::models::{SessionRecord, SessionStatus};
use crate::utils::fmt_number;

/// Operating hours given to fill records so they never look like a real
/// running interval of zero length.
pub const FILL_OPERATING_HOURS: f64 = 0.01;

/// Derive the separate refuelling record of a session, if fuel was added.
///
/// The fill record shares identity and time bounds with its parent, carries
/// no usage and closes at `opening_fuel + total_fill`.
pub fn derive_fill_record(session: &SessionRecord) -> Option<SessionRecord> {
    if session.total_fill <= 0.0 {
        return None;
    }

    Some(SessionRecord {
        branch: session.branch.clone(),
        company: session.company.clone(),
        cost_code: session.cost_code.clone(),
        session_date: session.session_date,
        session_start_time: session.session_start_time,
        session_end_time: session.session_end_time,
        operating_hours: FILL_OPERATING_HOURS,
        opening_percentage: session.opening_percentage,
        opening_fuel: session.opening_fuel,
        closing_percentage: session.closing_percentage,
        closing_fuel: session.opening_fuel + session.total_fill,
        total_usage: 0.0,
        total_fill: session.total_fill,
        liter_usage_per_hour: 0.0,
        cost_per_liter: session.cost_per_liter,
        cost_for_usage: 0.0,
        session_status: SessionStatus::FuelFillCompleted,
        notes: format!(
            "Fuel fill: {}L. Imported from {}",
            fmt_number(session.total_fill),
            session.source_file
        ),
        source_file: session.source_file.clone(),
    })
}
