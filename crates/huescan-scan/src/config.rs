//! Scan configuration.
//!
//! A [`ConfigFile`] is what the user writes (a JSON file, command-line flags,
//! or both merged). [`ConfigFile::resolve`] validates it into the
//! [`ScanConfig`] the walker and driver run on.
//!
//! ```json
//! {
//!   "initialPath": "styles",
//!   "fileExtensions": [".css", ".less", ".scss"],
//!   "searchFor": "colors",
//!   "notOlderThan": { "year": "2017", "month": "1", "day": "1" },
//!   "popularityThreshold": 3,
//!   "ignoreDirs": ["/old-version"],
//!   "ignoreFiles": ["old-staff.css"]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use huescan_css::SearchMode;
use serde::Deserialize;

use crate::error::{Result, ScanError};

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "huescan-report";

/// Files read concurrently when no worker count is configured.
pub const DEFAULT_WORKERS: usize = 10;

/// One component of a date, written either as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DatePart {
    /// `2017`
    Number(i64),
    /// `"2017"`
    Text(String),
}

impl DatePart {
    /// Numeric value. Zero and the empty string count as absent.
    fn value(&self, field: &str) -> Result<Option<i64>> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) if text.trim().is_empty() => return Ok(None),
            Self::Text(text) => text.trim().parse().map_err(|_| {
                ScanError::Config(format!("notOlderThan.{field}: '{text}' is not a number"))
            })?,
        };
        Ok((value != 0).then_some(value))
    }
}

impl From<i64> for DatePart {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// Modification-date cutoff as written in the config.
///
/// Without a year there is no cutoff. A month without a day means the first
/// of that month; a day without a month is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotOlderThan {
    /// Four-digit year.
    pub year: Option<DatePart>,
    /// 1-12.
    pub month: Option<DatePart>,
    /// 1-31.
    pub day: Option<DatePart>,
}

impl NotOlderThan {
    /// The validated cutoff, or `None` when the filter is disabled.
    ///
    /// # Errors
    ///
    /// [`ScanError::Config`] when a part is not a number, out of range, or
    /// the date does not exist.
    pub fn cutoff(&self) -> Result<Option<DateCutoff>> {
        let part = |p: Option<&DatePart>, field| p.map_or(Ok(None), |p| p.value(field));

        let Some(year) = part(self.year.as_ref(), "year")? else {
            return Ok(None);
        };
        let month = part(self.month.as_ref(), "month")?;
        let day = match month {
            Some(_) => part(self.day.as_ref(), "day")?,
            None => None,
        };

        let month = month.unwrap_or(1);
        if !(1..=12).contains(&month) {
            return Err(ScanError::Config(format!(
                "notOlderThan.month must be 1-12, got {month}"
            )));
        }
        let day = day.unwrap_or(1);
        if !(1..=31).contains(&day) {
            return Err(ScanError::Config(format!(
                "notOlderThan.day must be 1-31, got {day}"
            )));
        }

        DateCutoff::new(year, month, day).map(Some)
    }
}

/// Parses `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
impl FromStr for NotOlderThan {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().splitn(3, '-').map(|p| DatePart::Text(p.to_string()));
        let parsed = Self {
            year: parts.next(),
            month: parts.next(),
            day: parts.next(),
        };
        let _ = parsed.cutoff()?;
        Ok(parsed)
    }
}

/// Files last modified before local midnight of this date are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCutoff(NaiveDate);

impl DateCutoff {
    /// Build a cutoff from calendar parts.
    ///
    /// # Errors
    ///
    /// [`ScanError::Config`] when the date does not exist (`2023-02-30`).
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self> {
        let date = i32::try_from(year)
            .ok()
            .zip(u32::try_from(month).ok())
            .zip(u32::try_from(day).ok())
            .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d));
        date.map(Self).ok_or_else(|| {
            ScanError::Config(format!("notOlderThan: {year}-{month}-{day} is not a date"))
        })
    }

    /// The calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// Whether a file modified at `modified` is new enough.
    #[must_use]
    pub fn admits(&self, modified: SystemTime) -> bool {
        let modified = DateTime::<Local>::from(modified).naive_local();
        modified >= self.0.and_time(NaiveTime::default())
    }
}

/// Configuration as written by the user. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    /// Single directory to start from.
    pub initial_path: Option<PathBuf>,
    /// Directories to start from; replaces `initial_path`. The last one is
    /// walked first.
    pub set_dirs_to_parse: Vec<PathBuf>,
    /// Hand-picked files. The date cutoff does not apply to them.
    pub files_to_parse: Vec<PathBuf>,
    /// Allowed file extensions (`.css`). Empty allows every file.
    pub file_extensions: Vec<String>,
    /// What to look for.
    pub search_for: Option<SearchMode>,
    /// Modification-date cutoff.
    pub not_older_than: Option<NotOlderThan>,
    /// Minimum occurrences for a color to be reported; `0` disables.
    pub popularity_threshold: Option<usize>,
    /// Substrings of directory paths to skip.
    pub ignore_dirs: Vec<String>,
    /// Substrings of file paths to skip.
    pub ignore_files: Vec<String>,
    /// Where reports are written.
    pub output_dir: Option<PathBuf>,
    /// Number of files read concurrently.
    pub workers: Option<usize>,
}

impl ConfigFile {
    /// Read and parse a JSON config file.
    ///
    /// # Errors
    ///
    /// [`ScanError::Io`] when the file cannot be read and
    /// [`ScanError::ConfigParse`] when it is not a valid config.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| ScanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer `overrides` on top of `self`.
    ///
    /// Values set in `overrides` win. List fields are replaced, not
    /// appended, when the override list is non-empty.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        fn list<T>(base: Vec<T>, over: Vec<T>) -> Vec<T> {
            if over.is_empty() { base } else { over }
        }

        Self {
            initial_path: overrides.initial_path.or(self.initial_path),
            set_dirs_to_parse: list(self.set_dirs_to_parse, overrides.set_dirs_to_parse),
            files_to_parse: list(self.files_to_parse, overrides.files_to_parse),
            file_extensions: list(self.file_extensions, overrides.file_extensions),
            search_for: overrides.search_for.or(self.search_for),
            not_older_than: overrides.not_older_than.or(self.not_older_than),
            popularity_threshold: overrides.popularity_threshold.or(self.popularity_threshold),
            ignore_dirs: list(self.ignore_dirs, overrides.ignore_dirs),
            ignore_files: list(self.ignore_files, overrides.ignore_files),
            output_dir: overrides.output_dir.or(self.output_dir),
            workers: overrides.workers.or(self.workers),
        }
    }

    /// Validate into a runnable configuration.
    ///
    /// # Errors
    ///
    /// [`ScanError::Config`] when there is nothing to scan, the date cutoff
    /// is invalid, or `workers` is zero.
    pub fn resolve(self) -> Result<ScanConfig> {
        let roots = if self.set_dirs_to_parse.is_empty() {
            self.initial_path.into_iter().collect()
        } else {
            self.set_dirs_to_parse
        };
        if roots.is_empty() && self.files_to_parse.is_empty() {
            return Err(ScanError::Config(
                "no root path: set initialPath, setDirsToParse or filesToParse".to_string(),
            ));
        }

        let workers = self.workers.unwrap_or(DEFAULT_WORKERS);
        if workers == 0 {
            return Err(ScanError::Config("workers must be at least 1".to_string()));
        }

        let cutoff = match &self.not_older_than {
            Some(not_older_than) => not_older_than.cutoff()?,
            None => None,
        };

        Ok(ScanConfig {
            roots,
            files: self.files_to_parse,
            extensions: self
                .file_extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .filter(|ext| ext.len() > 1)
                .collect(),
            mode: self.search_for.unwrap_or_default(),
            cutoff,
            popularity_threshold: self.popularity_threshold.unwrap_or(0),
            ignore_dirs: drop_empty(self.ignore_dirs),
            ignore_files: drop_empty(self.ignore_files),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            workers,
        })
    }
}

/// `CSS` and `.css` both become `.css`.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') { ext } else { format!(".{ext}") }
}

/// An empty pattern would match every path.
fn drop_empty(patterns: Vec<String>) -> Vec<String> {
    patterns.into_iter().filter(|p| !p.is_empty()).collect()
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directories to walk. The walker pops from the end.
    pub roots: Vec<PathBuf>,
    /// Hand-picked files, exempt from the date cutoff.
    pub files: Vec<PathBuf>,
    /// Lower-case extensions with a leading dot. Empty allows everything.
    pub extensions: Vec<String>,
    /// What to extract.
    pub mode: SearchMode,
    /// Modification-date cutoff for walked files.
    pub cutoff: Option<DateCutoff>,
    /// Minimum occurrences for a color to be reported.
    pub popularity_threshold: usize,
    /// Substrings of directory paths to skip.
    pub ignore_dirs: Vec<String>,
    /// Substrings of file paths to skip.
    pub ignore_files: Vec<String>,
    /// Where reports are written.
    pub output_dir: PathBuf,
    /// Number of files read concurrently.
    pub workers: usize,
}

impl ScanConfig {
    /// Configuration that walks `root` with every default.
    #[must_use]
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
            files: Vec::new(),
            extensions: Vec::new(),
            mode: SearchMode::default(),
            cutoff: None,
            popularity_threshold: 0,
            ignore_dirs: Vec::new(),
            ignore_files: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: DEFAULT_WORKERS,
        }
    }

    /// Whether the file name has an allowed extension.
    #[must_use]
    pub fn allows_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Whether a directory path contains an ignored substring.
    #[must_use]
    pub fn ignores_dir(&self, path: &Path) -> bool {
        contains_any(path, &self.ignore_dirs)
    }

    /// Whether a file path contains an ignored substring.
    #[must_use]
    pub fn ignores_file(&self, path: &Path) -> bool {
        contains_any(path, &self.ignore_files)
    }
}

fn contains_any(path: &Path, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let path = path.to_string_lossy();
    patterns.iter().any(|p| path.contains(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_part_zero_is_absent() {
        assert_eq!(DatePart::Number(0).value("year").unwrap(), None);
        assert_eq!(DatePart::Text(" ".into()).value("year").unwrap(), None);
        assert_eq!(DatePart::Text("07".into()).value("month").unwrap(), Some(7));
        assert!(DatePart::Text("July".into()).value("month").is_err());
    }

    #[test]
    fn test_extension_normalization() {
        assert_eq!(normalize_extension("CSS"), ".css");
        assert_eq!(normalize_extension(" .less "), ".less");
    }

    #[test]
    fn test_empty_patterns_are_dropped() {
        assert_eq!(drop_empty(vec![String::new(), "old".into()]), ["old"]);
    }
}
