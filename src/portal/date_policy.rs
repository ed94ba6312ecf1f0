use std::fmt::{Display, Write};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    Uk,
    Us,
    Iso,
}

impl DateStyle {
    pub fn format(&self) -> &'static str {
        match self {
            DateStyle::Uk => "%d/%m/%Y",
            DateStyle::Us => "%m/%d/%Y",
            DateStyle::Iso => "%Y-%m-%d",
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
            DateStyle::Iso => write!(f, "iso"),
        }
    }
}

/// Decides how "today" is written in the portal's date column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatPolicy {
    format: String,
}

impl DateFormatPolicy {
    /// Takes any chrono format string, for example `%d-%m-%Y`.
    ///
    /// Unknown specifiers and time fields such as `%H` are rejected here, so formatting a date
    /// later can't fail.
    pub fn new(format: impl Into<String>) -> Result<Self, ParseError> {
        let policy = Self {
            format: format.into(),
        };
        policy
            .try_format(NaiveDate::default())
            .map_err(|_| ParseError::InvalidDateFormat(policy.format.clone()))?;
        Ok(policy)
    }

    pub fn format(&self, date: NaiveDate) -> String {
        self.try_format(date).unwrap_or_default()
    }

    fn try_format(&self, date: NaiveDate) -> Result<String, std::fmt::Error> {
        let mut value = String::new();
        write!(value, "{}", date.format(&self.format))?;
        Ok(value)
    }

    /// Compares a portal cell with `date`. Leading zeroes the portal may omit are tolerated by
    /// parsing the cell back instead of comparing strings.
    pub fn matches(&self, cell: &str, date: NaiveDate) -> bool {
        let cell = cell.trim();
        cell == self.format(date)
            || NaiveDate::parse_from_str(cell, &self.format).is_ok_and(|v| v == date)
    }
}

impl Default for DateFormatPolicy {
    fn default() -> Self {
        DateStyle::Uk.into()
    }
}

impl From<DateStyle> for DateFormatPolicy {
    fn from(value: DateStyle) -> Self {
        Self {
            format: value.format().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use super::{DateFormatPolicy, DateStyle};
    use crate::portal::error::ParseError;

    const DATE: NaiveDate = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();

    #[test]
    fn presets_format_dates() {
        assert_eq!(DateFormatPolicy::from(DateStyle::Uk).format(DATE), "07/03/2026");
        assert_eq!(DateFormatPolicy::from(DateStyle::Us).format(DATE), "03/07/2026");
        assert_eq!(DateFormatPolicy::from(DateStyle::Iso).format(DATE), "2026-03-07");
    }

    #[test]
    fn matches_without_leading_zeroes() {
        let policy = DateFormatPolicy::default();
        assert!(policy.matches(" 07/03/2026 ", DATE));
        assert!(policy.matches("7/3/2026", DATE));
        assert!(!policy.matches("08/03/2026", DATE));
        assert!(!policy.matches("Fecha", DATE));
    }

    #[test]
    fn custom_format() -> Result<()> {
        let policy = DateFormatPolicy::new("%d-%m-%Y")?;
        assert!(policy.matches("07-03-2026", DATE));
        assert!(!policy.matches("07/03/2026", DATE));
        Ok(())
    }

    #[test]
    fn unknown_specifier_is_rejected() {
        assert!(matches!(
            DateFormatPolicy::new("%Q"),
            Err(ParseError::InvalidDateFormat(format)) if format == "%Q"
        ));
    }

    #[test]
    fn time_fields_are_rejected() {
        assert!(DateFormatPolicy::new("%d/%m/%Y %H:%M").is_err());
    }

    #[test]
    fn presets_are_valid_formats() {
        for style in [DateStyle::Uk, DateStyle::Us, DateStyle::Iso] {
            assert!(DateFormatPolicy::new(style.format()).is_ok(), "{style}");
        }
    }
}
