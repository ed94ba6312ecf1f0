use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    portal::{extract::create_extractor, read_record},
    utils::config::Config,
};

use super::options::{TableOptions, TimeOptions};

#[derive(Debug, Parser)]
pub struct InspectCommand {
    #[arg(help = "Saved copy of the attendance page")]
    file: PathBuf,
    #[command(flatten)]
    time: TimeOptions,
    #[command(flatten)]
    table: TableOptions,
}

/// Prints the record extracted from a saved page. Useful when the portal markup changes.
pub fn process_inspect_command(command: InspectCommand, config: Config) -> Result<()> {
    let page = std::fs::read_to_string(&command.file)
        .with_context(|| format!("Failed to read {}", command.file.display()))?;
    let extractor = create_extractor(command.table.extractor(&config))?;

    let record = read_record(
        &page,
        extractor.as_ref(),
        &config.columns,
        &command.table.date_policy(&config)?,
        command.time.clock().today(),
    )?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
