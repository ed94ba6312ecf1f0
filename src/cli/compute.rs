use anyhow::Result;
use clap::Parser;

use crate::{
    engine::{
        compute_work_status_with,
        record::{RawAttendanceRecord, PRESENCE_NOT_PROVIDED},
    },
    utils::config::Config,
};

use super::{options::TimeOptions, print_report};

#[derive(Debug, Parser)]
pub struct ComputeCommand {
    #[arg(
        long,
        conflicts_with_all = ["entries", "exits"],
        help = "Detail as shown by the portal, e.g. \"08:01:12 E | 12:00:40 S\""
    )]
    detail: Option<String>,
    #[arg(long, value_delimiter = ',', help = "Clock-in times, e.g. 08:00,12:30")]
    entries: Vec<String>,
    #[arg(long, value_delimiter = ',', help = "Clock-out times, e.g. 12:00")]
    exits: Vec<String>,
    #[arg(
        long,
        default_value = PRESENCE_NOT_PROVIDED,
        help = "Presence already aggregated by the portal as HH:MM. 0 means unknown"
    )]
    presence: String,
    #[command(flatten)]
    time: TimeOptions,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

impl ComputeCommand {
    fn record(&self, date: String) -> RawAttendanceRecord {
        match &self.detail {
            Some(detail) => RawAttendanceRecord::from_detail(date, &self.presence, detail),
            None => RawAttendanceRecord {
                date,
                presence: self.presence.clone(),
                entries: self.entries.clone(),
                exits: self.exits.clone(),
                raw_detail: String::new(),
            },
        }
    }
}

/// Computes a report from times typed on the command line, without touching the portal.
pub fn process_compute_command(command: ComputeCommand, config: Config) -> Result<()> {
    let clock = command.time.clock();
    let record = command.record(clock.today().to_string());
    let report = compute_work_status_with(&config.workday, Some(&record), clock.now());
    print_report(&report, command.json)
}
