//! Report writing errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while rendering or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The HTML template failed to compile or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Report data could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An output file or directory could not be written.
    #[error("cannot write '{}': {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
