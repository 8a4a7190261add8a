//! Error handling for POI cleaning operations.
//!
//! Covers the fatal failures of a run: missing or malformed input,
//! invalid configuration, and output writing. Per-record problems are
//! never errors; they are counted in the processing statistics.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid input in file: {path} - {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to parse config file {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Output failed for {path}: {reason}")]
    OutputFailed { path: PathBuf, reason: String },
}

impl PoiError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid input error for the given file
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PoiError>;
