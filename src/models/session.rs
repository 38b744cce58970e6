use super::session_status::SessionStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// One operating session of a site, as stored in `operating_sessions`.
///
/// Fill records derived from a session use the same shape with
/// `session_status = FUEL_FILL_COMPLETED`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub branch: String,                    // ⇔ operating_sessions.branch
    pub company: String,                   // ⇔ operating_sessions.company
    pub cost_code: String,                 // ⇔ operating_sessions.cost_code
    pub session_date: NaiveDate,           // ⇔ TEXT "YYYY-MM-DD"
    #[serde(serialize_with = "serialize_timestamp")]
    pub session_start_time: NaiveDateTime, // ⇔ TEXT "YYYY-MM-DDTHH:MM:SSZ"
    #[serde(serialize_with = "serialize_timestamp")]
    pub session_end_time: NaiveDateTime, // ⇔ TEXT "YYYY-MM-DDTHH:MM:SSZ"
    pub operating_hours: f64,
    pub opening_percentage: f64,
    pub opening_fuel: f64,
    pub closing_percentage: f64,
    pub closing_fuel: f64,
    pub total_usage: f64,
    pub total_fill: f64,
    pub liter_usage_per_hour: f64,
    pub cost_per_liter: f64,
    pub cost_for_usage: f64,
    pub session_status: SessionStatus,
    pub notes: String,
    pub source_file: String,
}

impl SessionRecord {
    pub fn date_str(&self) -> String {
        self.session_date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        format_timestamp(&self.session_start_time)
    }

    pub fn end_str(&self) -> String {
        format_timestamp(&self.session_end_time)
    }

    /// `BRANCH YYYY-MM-DD`, used to identify a record in messages.
    pub fn identity(&self) -> String {
        format!("{} {}", self.branch, self.date_str())
    }

    pub fn is_fill(&self) -> bool {
        self.session_status.is_fill()
    }
}

/// ISO-8601 UTC timestamp, e.g. `2026-01-20T06:00:00Z`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(ts))
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ").ok()
}

/// A session read back from the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredSession {
    pub id: i64,
    #[serde(flatten)]
    pub record: SessionRecord,
}
