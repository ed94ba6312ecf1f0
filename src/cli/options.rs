use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};

use crate::{
    portal::{
        date_policy::{DateFormatPolicy, DateStyle},
        extract::ExtractorKind,
    },
    utils::{
        clock::{clock_for, Clock},
        config::Config,
    },
};

#[derive(Debug, Clone, Default, clap::Args)]
pub struct TimeOptions {
    #[arg(long, value_parser = parse_clock_time, help = "Compute as if it was this time of day, e.g. 17:45")]
    pub at: Option<NaiveTime>,
    #[arg(long, value_parser = parse_iso_date, help = "Day to look up, as YYYY-MM-DD. Defaults to today")]
    pub date: Option<NaiveDate>,
}

impl TimeOptions {
    pub fn clock(&self) -> Box<dyn Clock> {
        clock_for(self.date, self.at)
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct TableOptions {
    #[arg(
        long,
        help = "Style of dates in the portal table. For uk it's day/month/year, for us it's month/day/year"
    )]
    pub date_style: Option<DateStyle>,
    #[arg(long, help = "Chrono format of dates in the portal table, e.g. %d-%m-%Y. Overrides --date-style")]
    pub date_format: Option<String>,
    #[arg(long, help = "How rows are read from the page")]
    pub extractor: Option<ExtractorKind>,
}

impl TableOptions {
    pub fn date_policy(&self, config: &Config) -> Result<DateFormatPolicy> {
        if let Some(format) = self.date_format.as_ref().or(config.date_format.as_ref()) {
            return DateFormatPolicy::new(format.clone())
                .context("Check --date-format or date_format in config.json");
        }
        Ok(self
            .date_style
            .or(config.date_style)
            .map(DateFormatPolicy::from)
            .unwrap_or_default())
    }

    pub fn extractor(&self, config: &Config) -> ExtractorKind {
        self.extractor.or(config.extractor).unwrap_or_default()
    }
}

pub fn parse_clock_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| format!("Expected HH:MM, got {value:?}: {e}"))
}

pub fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Expected YYYY-MM-DD, got {value:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, NaiveTime};

    use super::{parse_clock_time, parse_iso_date, TableOptions};
    use crate::{
        portal::{date_policy::DateStyle, extract::ExtractorKind},
        utils::config::Config,
    };

    const DATE: NaiveDate = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    #[test]
    fn parses_flags() {
        assert_eq!(
            parse_clock_time("17:45"),
            Ok(NaiveTime::from_hms_opt(17, 45, 0).unwrap())
        );
        assert!(parse_clock_time("5pm").is_err());
        assert_eq!(parse_iso_date("2026-10-18"), Ok(DATE));
        assert!(parse_iso_date("18/10/2026").is_err());
    }

    #[test]
    fn flags_override_config() -> Result<()> {
        let config = Config {
            date_style: Some(DateStyle::Us),
            extractor: Some(ExtractorKind::Regex),
            ..Config::default()
        };
        let options = TableOptions {
            date_style: Some(DateStyle::Iso),
            ..TableOptions::default()
        };
        assert_eq!(options.date_policy(&config)?.format(DATE), "2026-10-18");
        assert_eq!(options.extractor(&config), ExtractorKind::Regex);
        Ok(())
    }

    #[test]
    fn format_beats_style() -> Result<()> {
        let config = Config {
            date_format: Some("%d.%m.%Y".into()),
            ..Config::default()
        };
        let options = TableOptions {
            date_style: Some(DateStyle::Iso),
            ..TableOptions::default()
        };
        assert_eq!(options.date_policy(&config)?.format(DATE), "18.10.2026");
        Ok(())
    }

    #[test]
    fn invalid_date_format_is_an_error() {
        let config = Config {
            date_format: Some("%d/%m/%Y".into()),
            ..Config::default()
        };
        let options = TableOptions {
            date_format: Some("%Q".into()),
            ..TableOptions::default()
        };
        let error = options.date_policy(&config).unwrap_err();
        assert!(format!("{error:#}").contains("\"%Q\""), "{error:#}");
    }

    #[test]
    fn defaults_without_anything_set() -> Result<()> {
        let options = TableOptions::default();
        let config = Config::default();
        assert_eq!(options.date_policy(&config)?.format(DATE), "18/10/2026");
        assert_eq!(options.extractor(&config), ExtractorKind::Auto);
        Ok(())
    }
}
