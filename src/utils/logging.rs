use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::{format::FmtSpan, writer::MakeWriterExt};

pub const LOG_PREFIX: &str = "timeleft";

/// Replaces a global debug toggle. Passed down explicitly by whoever sets up logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingOptions {
    /// Mirror logs to stdout and record everything down to TRACE.
    pub verbose: bool,
    /// Overrides both `verbose` and `RUST_LOG`.
    pub level: Option<LevelFilter>,
}

impl LoggingOptions {
    fn level(&self) -> String {
        self.level
            .or(self.verbose.then_some(LevelFilter::TRACE))
            .map(|v| v.to_string())
            .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
    }
}

pub fn enable_logging(application_data_path: &Path, options: LoggingOptions) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(LOG_PREFIX)
        .build(application_data_path.join("logs"))?;

    let show_std = options.verbose;
    let stdout = std::io::stdout.with_filter(move |_| show_std);

    let level = options.level();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stdout.and(appender))
        .pretty()
        .init();
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
