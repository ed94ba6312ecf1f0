use super::{clock::parse_time_to_minutes, record::RawAttendanceRecord};

/// Total minutes present so far.
///
/// A presence value supplied by the portal wins, since it may already include break deductions.
/// Otherwise entries are paired positionally with exits and an unmatched entry runs until `now`.
/// Pairs whose exit isn't after the entry add nothing.
pub fn total_presence(record: &RawAttendanceRecord, now: i64) -> i64 {
    if let Some(presence) = record.provided_presence() {
        return parse_time_to_minutes(presence);
    }

    record
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry = parse_time_to_minutes(entry);
            let exit = record
                .exits
                .get(index)
                .map(|v| parse_time_to_minutes(v))
                .unwrap_or(now);
            exit.saturating_sub(entry).max(0)
        })
        .fold(0, i64::saturating_add)
}
