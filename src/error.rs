// src/error.rs
// =============================================================================
// Typed errors for the API clients and the report layer.
//
// The pipelines and main() use anyhow on top of these, so every variant
// here only has to describe *what* went wrong; the caller adds context.
//
// Three failure policies coexist in this tool:
// - sentinel-on-failure (branch listing, marker file): never an error here
// - propagate-as-error (commit timestamps, Canvas calls): RequestFailure
// - unchecked-trust (README fetch): the caller inspects the status code
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// The HTTP call itself failed, timed out, or returned an error status
    #[error("Request to {url} failed: {message}")]
    RequestFailure { url: String, message: String },

    /// A JSON body did not contain the field we index into
    #[error("Response from {url} is missing field '{field}'")]
    MissingField { url: String, field: String },

    #[error("Not a repository URL: {url}")]
    InvalidRepoUrl { url: String },

    #[error("Column '{column}' not found in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Column has {values} values but the table has {rows} rows")]
    RowMismatch { values: usize, rows: usize },

    #[error("Row has {found} cells but the table has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ReportError {
    /// Wraps a reqwest error for the given URL
    pub fn request(url: &str, error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "request timed out".to_string()
        } else {
            error.to_string()
        };

        ReportError::RequestFailure {
            url: url.to_string(),
            message,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
