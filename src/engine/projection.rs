use serde::{Deserialize, Serialize};

use super::clock::wrap_to_day;

/// Thresholds of a workday, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkdayPolicy {
    /// Presence needed before leaving. 8h30 by default.
    pub required_presence: i64,
    /// Span from the first entry after which leaving is allowed. 9h by default.
    pub max_span: i64,
    /// How long after reaching `max_span` the day counts as exactly nine hours.
    pub exact_window: i64,
}

impl Default for WorkdayPolicy {
    fn default() -> Self {
        Self {
            required_presence: 8 * 60 + 30,
            max_span: 9 * 60,
            exact_window: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveProjection {
    pub remaining_presence: i64,
    pub remaining_from_entry: i64,
    /// Minutes since midnight, already wrapped into a single day.
    pub can_leave_at: i64,
    pub exact_nine_hours: bool,
}

impl LeaveProjection {
    pub fn is_satisfied(&self) -> bool {
        self.remaining_presence == 0 && self.remaining_from_entry == 0
    }
}

/// Works out when both constraints will hold.
///
/// The constraints run concurrently, so the leave time is the later of "now plus the missing
/// presence" and "first entry plus the maximum span", not their sum. Arithmetic saturates, so
/// absurd presence values from the portal can't overflow.
pub fn project_leave_time(
    policy: &WorkdayPolicy,
    total_presence: i64,
    first_entry: i64,
    now: i64,
) -> LeaveProjection {
    let elapsed = now.saturating_sub(first_entry);
    let remaining_presence = policy
        .required_presence
        .saturating_sub(total_presence)
        .max(0);
    let remaining_from_entry = policy.max_span.saturating_sub(elapsed).max(0);

    let can_leave_at = if remaining_presence == 0 && remaining_from_entry == 0 {
        now
    } else {
        now.saturating_add(remaining_presence)
            .max(first_entry.saturating_add(policy.max_span))
    };

    LeaveProjection {
        remaining_presence,
        remaining_from_entry,
        can_leave_at: wrap_to_day(can_leave_at),
        exact_nine_hours: elapsed >= policy.max_span
            && elapsed < policy.max_span.saturating_add(policy.exact_window),
    }
}
