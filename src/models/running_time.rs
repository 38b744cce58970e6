use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// A period during which the generator was running, as reported by a
/// `Running Time  From: HH:MM:SS  To: HH:MM:SS` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunningTimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl RunningTimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start)
    }

    /// End timestamp on `date`; a window ending before it starts ran past midnight.
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        let end = date.and_time(self.end);
        if self.end < self.start {
            end + Duration::days(1)
        } else {
            end
        }
    }

    /// `HH:MM:SS-HH:MM:SS`, the format used inside session notes.
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%H:%M:%S"),
            self.end.format("%H:%M:%S")
        )
    }
}
