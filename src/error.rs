//! Error type shared by every stage of the conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors raised while converting ASlib scenarios.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Invalid run configuration, detected before any scenario is touched.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A scenario directory could not be read or parsed.
    #[error("failed to read scenario at {}: {message}", path.display())]
    ScenarioRead { path: PathBuf, message: String },

    /// Filesystem failure while reading or writing.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ConvertError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ConvertError::Configuration(message.into())
    }

    pub(crate) fn scenario(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConvertError::ScenarioRead {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}
