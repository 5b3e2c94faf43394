//! Errors raised while configuring and walking a scan.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a scan step.
///
/// `Io` is recovered per entry by the walker and the driver. `Config` and
/// `ConfigParse` are fatal and surface before anything is written.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A stat, list or read call failed.
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration file is not valid JSON for the expected shape.
    #[error("cannot parse config '{}': {source}", path.display())]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Wrap an IO error with the path it happened on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the run must stop.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
