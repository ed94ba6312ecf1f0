use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Portal answered {status} for {url}")]
    Status { status: StatusCode, url: String },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid selector {0}")]
    InvalidSelector(String),

    #[error("Invalid date format {0:?}")]
    InvalidDateFormat(String),

    #[error("Row {row} has no {column} column (expected at index {index})")]
    MissingColumn {
        row: usize,
        column: &'static str,
        index: usize,
    },
}

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Failed to fetch attendance page")]
    Fetch(#[from] FetchError),

    #[error("Failed to read attendance table")]
    Parse(#[from] ParseError),
}
