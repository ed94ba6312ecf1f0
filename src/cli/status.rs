use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use reqwest::Url;

use crate::{
    engine::compute_work_status_with,
    portal::{client::HttpPortalClient, extract::create_extractor, fetch_record},
    utils::config::Config,
};

use super::{
    options::{TableOptions, TimeOptions},
    print_report, Args,
};

#[derive(Debug, Parser)]
pub struct StatusCommand {
    #[arg(
        long,
        env = "TIMELEFT_PORTAL_URL",
        help = "Address of the attendance page"
    )]
    url: Option<String>,
    #[arg(
        long,
        env = "TIMELEFT_SESSION_COOKIE",
        hide_env_values = true,
        help = "Cookie header of a logged in session, e.g. JSESSIONID=..."
    )]
    cookie: Option<String>,
    #[command(flatten)]
    time: TimeOptions,
    #[command(flatten)]
    table: TableOptions,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

/// Fetches today's row from the portal and prints how much of the day is left.
pub async fn process_status_command(command: StatusCommand, config: Config) -> Result<()> {
    let url = resolve_url(command.url.as_deref(), &config)?;
    let cookie = command.cookie.or_else(|| config.session_cookie.clone());

    let clock = command.time.clock();
    let client = HttpPortalClient::new(url, cookie)?;
    let extractor = create_extractor(command.table.extractor(&config))?;

    let record = fetch_record(
        &client,
        extractor.as_ref(),
        &config.columns,
        &command.table.date_policy(&config)?,
        clock.today(),
    )
    .await?;

    let report = compute_work_status_with(&config.workday, record.as_ref(), clock.now());
    print_report(&report, command.json)
}

fn resolve_url(flag: Option<&str>, config: &Config) -> Result<Url> {
    let Some(url) = flag.or(config.portal_url.as_deref()) else {
        return Err(Args::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "No portal address. Pass --url, set TIMELEFT_PORTAL_URL or add portal_url to config.json",
            )
            .into());
    };
    Url::parse(url).with_context(|| format!("Invalid portal address {url}"))
}

#[cfg(test)]
mod tests {
    use super::resolve_url;
    use crate::utils::config::Config;

    #[test]
    fn flag_wins_over_config() {
        let config = Config {
            portal_url: Some("https://config.example.com/".into()),
            ..Config::default()
        };
        let url = resolve_url(Some("https://flag.example.com/fichajes"), &config).unwrap();
        assert_eq!(url.host_str(), Some("flag.example.com"));

        let url = resolve_url(None, &config).unwrap();
        assert_eq!(url.host_str(), Some("config.example.com"));
    }

    #[test]
    fn missing_or_invalid_url_is_an_error() {
        assert!(resolve_url(None, &Config::default()).is_err());
        assert!(resolve_url(Some("not a url"), &Config::default()).is_err());
    }
}
