pub mod compute;
pub mod inspect;
pub mod options;
pub mod render;
pub mod status;

use std::{io::IsTerminal, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use compute::{process_compute_command, ComputeCommand};
use inspect::{process_inspect_command, InspectCommand};
use status::{process_status_command, StatusCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    engine::record::WorkStatusReport,
    utils::{
        config::Config,
        dir::{create_application_default_path, create_dir},
        logging::{enable_logging, LoggingOptions},
    },
};

#[derive(Parser, Debug)]
#[command(name = "timeleft", version, long_about = None)]
#[command(about = "Tells you when you can leave work, based on your attendance portal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable verbose logging to the console")]
    log: bool,
    #[arg(long = "log-filter", global = true, help = "Log level, e.g. debug. Overrides RUST_LOG")]
    log_filter: Option<LevelFilter>,
    #[arg(
        long,
        global = true,
        help = "Application directory for logs and config.json. By default tries $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Fetch today's attendance from the portal and show the time left")]
    Status {
        #[command(flatten)]
        command: StatusCommand,
    },
    #[command(about = "Compute the time left from times given on the command line")]
    Compute {
        #[command(flatten)]
        command: ComputeCommand,
    },
    #[command(about = "Show the record extracted from a saved attendance page")]
    Inspect {
        #[command(flatten)]
        command: InspectCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let dir = args
        .dir
        .map_or_else(create_application_default_path, create_dir)?;
    enable_logging(
        &dir,
        LoggingOptions {
            verbose: args.log,
            level: args.log_filter,
        },
    )?;
    let config = Config::load(&dir)?;

    match args.commands {
        Commands::Status { command } => process_status_command(command, config).await,
        Commands::Compute { command } => process_compute_command(command, config),
        Commands::Inspect { command } => process_inspect_command(command, config),
    }
}

fn print_report(report: &WorkStatusReport, json: bool) -> Result<()> {
    if json {
        println!("{}", render::render_json(report)?);
    } else {
        println!(
            "{}",
            render::render_text(report, std::io::stdout().is_terminal())
        );
    }
    Ok(())
}
