use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Completed,
    FuelFillCompleted,
}

impl SessionStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionStatus::Completed => "COMPLETED",
            SessionStatus::FuelFillCompleted => "FUEL_FILL_COMPLETED",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "COMPLETED" => Some(SessionStatus::Completed),
            "FUEL_FILL_COMPLETED" => Some(SessionStatus::FuelFillCompleted),
            _ => None,
        }
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, SessionStatus::FuelFillCompleted)
    }
}
