//! Reads today's attendance from the portal.
//!
//! The portal renders one table row per day: the date, an optional presence total and a detail
//! cell such as `08:01:12 E | 12:00:40 S`. This module fetches the page, extracts rows with an
//! [extract::HtmlRowExtractor] and turns the row for a given date into a [RawAttendanceRecord].

pub mod client;
pub mod date_policy;
pub mod error;
pub mod extract;

use chrono::NaiveDate;
use client::PortalClient;
use date_policy::DateFormatPolicy;
use error::{ParseError, PortalError};
use extract::{HtmlRowExtractor, TableRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::engine::record::{RawAttendanceRecord, PRESENCE_NOT_PROVIDED};

/// Which cell of a row holds what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub date: usize,
    pub presence: usize,
    pub detail: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            date: 0,
            presence: 1,
            detail: 2,
        }
    }
}

/// Finds the row for `date` and normalizes it.
///
/// `Ok(None)` means the portal has no row for that day, which the engine treats as not working.
pub fn record_for_date(
    rows: &[TableRow],
    layout: &ColumnLayout,
    policy: &DateFormatPolicy,
    date: NaiveDate,
) -> Result<Option<RawAttendanceRecord>, ParseError> {
    let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| {
        row.cell(layout.date)
            .is_some_and(|cell| policy.matches(cell, date))
    }) else {
        return Ok(None);
    };

    let detail = row.cell(layout.detail).ok_or(ParseError::MissingColumn {
        row: index,
        column: "detail",
        index: layout.detail,
    })?;
    let presence = row
        .cell(layout.presence)
        .filter(|v| !v.is_empty())
        .unwrap_or(PRESENCE_NOT_PROVIDED);
    let date = row.cell(layout.date).unwrap_or_default().trim();

    Ok(Some(RawAttendanceRecord::from_detail(date, presence, detail)))
}

/// Fetches the page and returns the record for `date`. Failures are logged before being handed
/// back to the caller.
#[instrument(skip(client, extractor, layout, policy))]
pub async fn fetch_record(
    client: &dyn PortalClient,
    extractor: &dyn HtmlRowExtractor,
    layout: &ColumnLayout,
    policy: &DateFormatPolicy,
    date: NaiveDate,
) -> Result<Option<RawAttendanceRecord>, PortalError> {
    let page = client
        .fetch_attendance_page()
        .await
        .inspect_err(|e| error!("Couldn't fetch attendance page {e:?}"))?;

    let record = read_record(&page, extractor, layout, policy, date)
        .inspect_err(|e| error!("Couldn't read attendance page {e:?}"))?;
    Ok(record)
}

/// Same as [fetch_record] for a page that is already available, for example saved to disk.
pub fn read_record(
    page: &str,
    extractor: &dyn HtmlRowExtractor,
    layout: &ColumnLayout,
    policy: &DateFormatPolicy,
    date: NaiveDate,
) -> Result<Option<RawAttendanceRecord>, ParseError> {
    let rows = extractor.extract_rows(page)?;
    debug!("Extracted {} rows", rows.len());

    let record = record_for_date(&rows, layout, policy, date)?;
    match &record {
        Some(record) => info!(
            "Found {} entries and {} exits for {}",
            record.entries.len(),
            record.exits.len(),
            record.date
        ),
        None => info!("No attendance row for {}", policy.format(date)),
    }
    Ok(record)
}

#[cfg(test)]
pub(crate) const TEST_PAGE: &str = r#"
    <html><body>
    <table id="fichajes">
      <thead><tr><th>Fecha</th><th>Presencia</th><th>Detalle</th></tr></thead>
      <tbody>
        <tr class="odd">
          <td>17/10/2026</td><td>08:42</td>
          <td><span>07:58:10 E</span> | <span>16:40:00 S</span></td>
        </tr>
        <tr>
          <td> 18/10/2026 </td><td>&nbsp;</td>
          <td>08:01:12 E | 12:00:40 S |
              12:45:00&nbsp;E</td>
        </tr>
      </tbody>
    </table>
    </body></html>
"#;
