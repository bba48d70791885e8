//! Error types for tfbs-extract

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type alias for tfbs-extract operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Fatal errors. Row-level problems never surface here; they are counted
/// and reported through a [`Sink`](crate::sink::Sink) instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Required input file is absent or not a regular file
    #[error("{what} not found: {}", .path.display())]
    NotFound {
        /// Which input was being opened ("genome file", "peaks file")
        what: &'static str,
        path: PathBuf,
    },

    /// Structural violation in an input file
    #[error("invalid format in {}: {msg}", .path.display())]
    Format { path: PathBuf, msg: String },

    /// Failure to create the output directory or write an output file
    #[error("cannot {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global logger was already installed
    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl ExtractError {
    pub(crate) fn format(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        ExtractError::Format {
            path: path.into(),
            msg: msg.into(),
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExtractError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
