use chrono::{NaiveTime, Timelike};

/// Displayed when no time was recorded.
pub const NO_TIME: &str = "--:--";

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Converts `HH:MM` into minutes since midnight.
///
/// Values are not range checked, so `25:75` becomes 1575. Empty strings, the `--:--` sentinel,
/// the `0` presence sentinel, anything that isn't two integer parts and values too large for an
/// `i64` of minutes all count as 0.
pub fn parse_time_to_minutes(value: &str) -> i64 {
    let value = value.trim();
    if value.is_empty() || value == NO_TIME || value == "0" {
        return 0;
    }
    let Some((hours, minutes)) = value.split_once(':') else {
        return 0;
    };
    match (hours.trim().parse::<i64>(), minutes.trim().parse::<i64>()) {
        (Ok(hours), Ok(minutes)) => hours
            .checked_mul(60)
            .and_then(|v| v.checked_add(minutes))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Formats a signed amount of minutes as `HH:MM`, prefixing `-` for negative values.
pub fn format_minutes_to_time(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let magnitude = minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
}

/// Minutes elapsed since midnight for a wall clock time. Seconds are dropped.
pub fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Folds a minute count into a single day so times past midnight read as early morning.
pub fn wrap_to_day(minutes: i64) -> i64 {
    minutes.rem_euclid(MINUTES_PER_DAY)
}
