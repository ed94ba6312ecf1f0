use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}:\d{2}):\d{2}\s+([ES])$").expect("Segment pattern should be valid")
});

/// Clock-in and clock-out times extracted from a portal detail string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedTimestamps {
    pub entries: Vec<String>,
    pub exits: Vec<String>,
}

/// Splits a detail string such as `08:01:12 E | 12:00:40 S` into entries and exits.
///
/// Segments that don't look like `HH:MM:SS E` or `HH:MM:SS S` are skipped. The portal emits
/// timestamps in chronological order, so nothing is sorted here.
pub fn parse_timestamps(raw_detail: &str) -> ParsedTimestamps {
    let mut parsed = ParsedTimestamps::default();

    for segment in raw_detail.split('|').map(str::trim).filter(|v| !v.is_empty()) {
        let Some(captures) = SEGMENT.captures(segment) else {
            trace!("Skipping malformed timestamp segment {segment:?}");
            continue;
        };
        let time = captures[1].to_string();
        match &captures[2] {
            "E" => parsed.entries.push(time),
            _ => parsed.exits.push(time),
        }
    }

    parsed
}
