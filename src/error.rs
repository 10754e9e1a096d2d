//! Error types for RCS plot comparison.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for comparison operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or comparing plot files.
#[derive(Debug, Error)]
pub enum Error {
    /// A data line does not hold 7 or 9 numeric fields.
    #[error("{source_name} has incorrect entries on line {line_no} ({reason}): {line}")]
    Format {
        source_name: String,
        line_no: usize,
        line: String,
        reason: String,
    },

    /// The file contained no data rows at all.
    #[error("no data found in plot file {source_name}")]
    NoData { source_name: String },

    /// Plot file could not be read.
    #[error("error opening plot file `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be read.
    #[error("error reading config file `{}`: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid comparison settings.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Report writer error.
    #[error("IO error: {0}")]
    Write(#[from] std::io::Error),
}

impl Error {
    /// Build a format error for one offending line.
    pub(crate) fn format(
        source_name: &str,
        line_no: usize,
        line: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Format {
            source_name: source_name.to_string(),
            line_no,
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from reading or parsing a plot file.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::NoData { .. } | Self::Io { .. }
        )
    }
}
