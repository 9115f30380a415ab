use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One attendance entry as the server reports it. Timestamps are naive UTC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: u64,
    pub employee_id: u64,
    pub employee_name: String,
    pub check_in: NaiveDateTime,
    pub check_out: Option<NaiveDateTime>,
    pub location: Location,
    #[serde(default)]
    pub notes: String,
    pub is_active: bool,
    /// Server-computed duration string, present for open and closed entries alike.
    #[serde(default)]
    pub duration_formatted: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Office,
    Home,
}

impl Location {
    pub fn label(&self) -> &'static str {
        match self {
            Location::Office => "Office",
            Location::Home => "Home (remote)",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate counters for the current day. Extra server fields are ignored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyStats {
    pub currently_working: u32,
    pub checked_in_today: u32,
    pub in_office: u32,
    pub in_home: u32,
}

#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub attendance: Option<AttendanceRecord>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceListResponse {
    pub attendances: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize)]
pub struct CheckInRequest {
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CheckOutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ActionResponse {
    pub message: String,
    #[serde(default)]
    pub attendance: Option<AttendanceRecord>,
}
