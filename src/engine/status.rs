use super::{
    projection::LeaveProjection,
    record::{RawAttendanceRecord, WorkStatus},
};

/// Picks the lifecycle state of a day that has at least one entry.
pub fn classify(record: &RawAttendanceRecord, projection: &LeaveProjection) -> WorkStatus {
    if projection.is_satisfied() {
        WorkStatus::CanLeave
    } else if !record.exits.is_empty() && record.exits.len() == record.entries.len() {
        WorkStatus::OutOfOffice
    } else {
        WorkStatus::Working
    }
}
