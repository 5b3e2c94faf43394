//! Configuration, traversal and the parallel extraction driver for huescan.
//!
//! # Scope
//!
//! - **Configuration** - JSON config files and command-line overrides,
//!   validated into a [`ScanConfig`]
//! - **Traversal** - a sorted, stack-based walk with extension, ignore and
//!   modification-date filters, behind the [`FileSystem`] trait
//! - **Driver** - a bounded worker pool that reads and extracts files and a
//!   single writer that aggregates them in traversal order
//!
//! Errors that only affect one entry (an unreadable directory, a file that
//! vanished) are recovered and collected as issues. Configuration errors are
//! fatal.

/// Scan configuration.
pub mod config;
/// Extraction driver.
pub mod driver;
/// Scan errors.
pub mod error;
/// Filesystem access.
pub mod fs;
/// Directory traversal.
pub mod walk;

pub use config::{ConfigFile, DateCutoff, NotOlderThan, ScanConfig};
pub use driver::{ScanOutcome, scan, scan_with};
pub use error::ScanError;
pub use fs::{EntryKind, EntryStat, FileSystem, OsFileSystem};
pub use walk::collect_files;
