use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::timestamps::parse_timestamps;

/// Presence value used by the portal when it didn't aggregate the day.
pub const PRESENCE_NOT_PROVIDED: &str = "0";

/// One day of attendance as read from the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttendanceRecord {
    /// Date exactly as the portal displays it.
    pub date: String,
    /// `HH:MM` total computed by the portal, or [PRESENCE_NOT_PROVIDED].
    pub presence: String,
    pub entries: Vec<String>,
    pub exits: Vec<String>,
    /// Original pipe separated detail. Kept for diagnostics.
    #[serde(default)]
    pub raw_detail: String,
}

impl RawAttendanceRecord {
    /// Builds a record from the portal detail column, splitting it into entries and exits.
    pub fn from_detail(
        date: impl Into<String>,
        presence: impl Into<String>,
        raw_detail: impl Into<String>,
    ) -> Self {
        let raw_detail = raw_detail.into();
        let parsed = parse_timestamps(&raw_detail);
        Self {
            date: date.into(),
            presence: presence.into(),
            entries: parsed.entries,
            exits: parsed.exits,
            raw_detail,
        }
    }

    /// Portal supplied presence, if it actually supplied one.
    pub fn provided_presence(&self) -> Option<&str> {
        let presence = self.presence.trim();
        if presence.is_empty() || presence == PRESENCE_NOT_PROVIDED {
            None
        } else {
            Some(presence)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    NotWorking,
    Working,
    OutOfOffice,
    CanLeave,
}

impl WorkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkStatus::NotWorking => "Not working today",
            WorkStatus::Working => "Working",
            WorkStatus::OutOfOffice => "Out of office",
            WorkStatus::CanLeave => "You can leave",
        }
    }
}

impl Display for WorkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkStatus::NotWorking => write!(f, "not_working"),
            WorkStatus::Working => write!(f, "working"),
            WorkStatus::OutOfOffice => write!(f, "out_of_office"),
            WorkStatus::CanLeave => write!(f, "can_leave"),
        }
    }
}

/// Result of a single computation. All durations are in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkStatusReport {
    pub remaining_presence: i64,
    pub remaining_from_entry: i64,
    pub can_leave_at: String,
    pub status: String,
    pub work_status: WorkStatus,
    pub total_presence: i64,
    pub entry_time: String,
    pub exit_time: String,
    pub exact_nine_hours: bool,
}
