//! Time accounting for a single workday.
//!
//! Everything in here is a pure calculation over a [RawAttendanceRecord] and the current time.
//! Fetching and parsing the portal page happens in [crate::portal].

pub mod clock;
pub mod presence;
pub mod projection;
pub mod record;
pub mod status;
pub mod timestamps;

use chrono::NaiveTime;
use tracing::{debug, instrument};

use clock::{format_minutes_to_time, minutes_of_day, parse_time_to_minutes, NO_TIME};
use presence::total_presence;
use projection::{project_leave_time, WorkdayPolicy};
use record::{RawAttendanceRecord, WorkStatus, WorkStatusReport};
use status::classify;

/// Computes the report using the default 8h30 / 9h policy.
pub fn compute_work_status(
    record: Option<&RawAttendanceRecord>,
    now: NaiveTime,
) -> WorkStatusReport {
    compute_work_status_with(&WorkdayPolicy::default(), record, now)
}

#[instrument(skip(record), fields(date = record.map(|v| v.date.as_str())))]
pub fn compute_work_status_with(
    policy: &WorkdayPolicy,
    record: Option<&RawAttendanceRecord>,
    now: NaiveTime,
) -> WorkStatusReport {
    let Some(record) = record.filter(|v| !v.entries.is_empty()) else {
        debug!("No entries recorded, nothing to compute");
        return not_working(policy);
    };

    let now = minutes_of_day(now);
    let first_entry = &record.entries[0];
    let total_presence = total_presence(record, now);
    let projection =
        project_leave_time(policy, total_presence, parse_time_to_minutes(first_entry), now);
    let work_status = classify(record, &projection);

    debug!(
        total_presence,
        remaining_presence = projection.remaining_presence,
        remaining_from_entry = projection.remaining_from_entry,
        "Computed {work_status}"
    );

    WorkStatusReport {
        remaining_presence: projection.remaining_presence,
        remaining_from_entry: projection.remaining_from_entry,
        can_leave_at: format_minutes_to_time(projection.can_leave_at),
        status: work_status.label().to_string(),
        work_status,
        total_presence,
        entry_time: first_entry.clone(),
        exit_time: record.exits.last().cloned().unwrap_or_else(|| NO_TIME.to_string()),
        exact_nine_hours: projection.exact_nine_hours,
    }
}

fn not_working(policy: &WorkdayPolicy) -> WorkStatusReport {
    WorkStatusReport {
        remaining_presence: policy.required_presence,
        remaining_from_entry: policy.max_span,
        can_leave_at: NO_TIME.to_string(),
        status: WorkStatus::NotWorking.label().to_string(),
        work_status: WorkStatus::NotWorking,
        total_presence: 0,
        entry_time: NO_TIME.to_string(),
        exit_time: NO_TIME.to_string(),
        exact_nine_hours: false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::{compute_work_status, compute_work_status_with, projection::WorkdayPolicy};
    use crate::{
        engine::record::{RawAttendanceRecord, WorkStatus},
        utils::logging::TEST_LOGGING,
    };

    fn time(hours: u32, minutes: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hours, minutes, 0).unwrap()
    }

    fn record(presence: &str, entries: &[&str], exits: &[&str]) -> RawAttendanceRecord {
        RawAttendanceRecord {
            date: "18/10/2026".into(),
            presence: presence.into(),
            entries: entries.iter().map(|v| v.to_string()).collect(),
            exits: exits.iter().map(|v| v.to_string()).collect(),
            raw_detail: String::new(),
        }
    }

    #[test]
    fn missing_record_is_not_working() {
        *TEST_LOGGING;
        let report = compute_work_status(None, time(10, 0));
        assert_eq!(report.work_status, WorkStatus::NotWorking);
        assert_eq!(report.remaining_presence, 510);
        assert_eq!(report.remaining_from_entry, 540);
        assert_eq!(report.can_leave_at, "--:--");
        assert_eq!(report.entry_time, "--:--");
        assert_eq!(report.exit_time, "--:--");
        assert_eq!(report.total_presence, 0);
        assert!(!report.exact_nine_hours);
    }

    #[test]
    fn record_without_entries_is_not_working() {
        let record = record("04:00", &[], &["12:00"]);
        let report = compute_work_status(Some(&record), time(10, 0));
        assert_eq!(report.work_status, WorkStatus::NotWorking);
        assert_eq!(report.total_presence, 0);
    }

    #[test]
    fn presence_reached_waits_for_span() {
        let record = record("0", &["09:00"], &[]);
        let report = compute_work_status(Some(&record), time(17, 30));
        assert_eq!(report.total_presence, 510);
        assert_eq!(report.remaining_presence, 0);
        assert_eq!(report.remaining_from_entry, 30);
        assert_eq!(report.can_leave_at, "18:00");
        assert_eq!(report.work_status, WorkStatus::Working);
        assert_eq!(report.entry_time, "09:00");
        assert_eq!(report.exit_time, "--:--");
    }

    #[test]
    fn balanced_pairs_are_out_of_office() {
        let record = record("0", &["08:00"], &["12:00"]);
        let report = compute_work_status(Some(&record), time(16, 0));
        assert_eq!(report.total_presence, 240);
        assert_eq!(report.work_status, WorkStatus::OutOfOffice);
        assert_eq!(report.status, "Out of office");
        assert_eq!(report.exit_time, "12:00");
    }

    #[test]
    fn portal_presence_is_trusted() {
        let record = record("08:30", &["09:00", "13:00"], &["10:00"]);
        let report = compute_work_status(Some(&record), time(18, 0));
        assert_eq!(report.total_presence, 510);
        assert_eq!(report.work_status, WorkStatus::CanLeave);
        assert_eq!(report.can_leave_at, "18:00");
    }

    #[test]
    fn repeated_calls_match() {
        let record = record("0", &["07:45", "13:10"], &["12:30"]);
        let first = compute_work_status(Some(&record), time(15, 20));
        let second = compute_work_status(Some(&record), time(15, 20));
        assert_eq!(first, second);
    }

    #[test]
    fn late_start_wraps_to_next_morning() {
        let record = record("0", &["20:00"], &[]);
        let report = compute_work_status(Some(&record), time(20, 0));
        assert_eq!(report.remaining_presence, 510);
        assert_eq!(report.can_leave_at, "05:00");
    }

    #[test]
    fn exact_nine_hours_flag() {
        let record = record("0", &["08:00"], &[]);
        let report = compute_work_status(Some(&record), time(17, 2));
        assert!(report.exact_nine_hours);
        assert_eq!(report.work_status, WorkStatus::CanLeave);
        assert_eq!(report.can_leave_at, "17:02");
    }

    #[test]
    fn custom_policy_defaults_when_not_working() {
        let policy = WorkdayPolicy {
            required_presence: 420,
            max_span: 480,
            exact_window: 5,
        };
        let report = compute_work_status_with(&policy, None, time(9, 0));
        assert_eq!(report.remaining_presence, 420);
        assert_eq!(report.remaining_from_entry, 480);
    }
}
