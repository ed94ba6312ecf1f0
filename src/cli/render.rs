use ansi_term::{Colour, Style};

use crate::engine::{
    clock::format_minutes_to_time,
    record::{WorkStatus, WorkStatusReport},
};

fn status_style(status: WorkStatus) -> Style {
    match status {
        WorkStatus::CanLeave => Colour::Green.bold(),
        WorkStatus::Working => Colour::Yellow.bold(),
        WorkStatus::OutOfOffice => Colour::Blue.bold(),
        WorkStatus::NotWorking => Style::new().dimmed(),
    }
}

/// Human readable report. `color` should only be set when writing to a terminal.
pub fn render_text(report: &WorkStatusReport, color: bool) -> String {
    let status = if color {
        status_style(report.work_status)
            .paint(report.status.as_str())
            .to_string()
    } else {
        report.status.clone()
    };

    let mut lines = vec![
        format!("Status:          {status}"),
        format!(
            "Presence:        {} ({} left)",
            format_minutes_to_time(report.total_presence),
            format_minutes_to_time(report.remaining_presence)
        ),
        format!(
            "Span left:       {}",
            format_minutes_to_time(report.remaining_from_entry)
        ),
        format!("Can leave at:    {}", report.can_leave_at),
        format!("First entry:     {}", report.entry_time),
        format!("Last exit:       {}", report.exit_time),
    ];
    if report.exact_nine_hours {
        lines.push("Nine hours since your first entry, right now.".to_string());
    }
    lines.join("\n")
}

pub fn render_json(report: &WorkStatusReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
