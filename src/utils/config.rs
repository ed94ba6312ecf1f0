use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    engine::projection::WorkdayPolicy,
    portal::{date_policy::DateStyle, extract::ExtractorKind, ColumnLayout},
};

pub const CONFIG_FILE: &str = "config.json";

/// Contents of `config.json` in the application directory. Command line flags and environment
/// variables take precedence over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub portal_url: Option<String>,
    pub session_cookie: Option<String>,
    pub date_style: Option<DateStyle>,
    /// Chrono format string. Wins over `date_style`.
    pub date_format: Option<String>,
    pub extractor: Option<ExtractorKind>,
    pub columns: ColumnLayout,
    pub workday: WorkdayPolicy,
}

impl Config {
    /// Reads the config in `dir`. A missing file is the same as an empty one.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {path:?}, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read config {}", path.display())),
        }
    }
}
