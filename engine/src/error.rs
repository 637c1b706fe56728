use std::path::PathBuf;
use thiserror::Error;

/// Failures that escape the engine. Everything recoverable is a `SkipReason` instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("Spreadsheet error: {source}")]
    SpreadsheetError {
        #[from]
        source: calamine::Error,
    },

    #[error("Invalid search pattern: {source}")]
    PatternError {
        #[from]
        source: regex::Error,
    },

    #[error("Internal processing error: {0}")]
    ProcessingError(String),
}

/// Why one input file was left out of a dataset.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("file name does not follow <month>_<year>: {0}")]
    UnrecognizedFileName(String),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("file has no header row")]
    NoHeader,

    #[error("unreadable file: {0}")]
    Unreadable(#[from] EngineError),
}

/// A file dropped from a dataset, kept for diagnostics.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}
