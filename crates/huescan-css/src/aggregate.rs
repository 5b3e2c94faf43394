//! Per-file extraction and the single-writer aggregator.
//!
//! [`extract_file`] is pure and can run on any thread. Its result is handed
//! to an [`Aggregator`], which owns all mutable state for a run and turns it
//! into a [`Report`] once every file has been added.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::color::{CanonicalColor, ParsedColor, check_color};
use crate::rank::{filter_by_popularity, sort_swatches};
use crate::registry::{ColorEntry, ColorRegistry};
use crate::tokens::{ColorToken, extract_tokens};
use crate::variables::{ResolvedVariable, VariableTable};

/// What a run looks for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Color literals, aggregated across all files.
    #[default]
    Colors,
    /// Variable declarations, reported per file.
    Variables,
}

/// Everything pulled out of one file.
#[derive(Debug, Clone)]
pub enum Extracted {
    /// Valid colors in source order.
    Colors(Vec<ParsedColor>),
    /// The file's variable table.
    Variables(VariableTable),
}

/// Result of [`extract_file`].
#[derive(Debug, Clone)]
pub struct FileExtraction {
    /// File the data came from.
    pub path: PathBuf,
    /// Extracted data.
    pub extracted: Extracted,
    /// Candidate tokens that failed validation.
    pub rejected: Vec<ColorToken>,
}

/// Extract colors or variables from the text of one file.
///
/// A malformed token is logged and dropped; it never aborts the file.
#[must_use]
pub fn extract_file(mode: SearchMode, path: &Path, text: &str) -> FileExtraction {
    let mut rejected = Vec::new();

    let extracted = match mode {
        SearchMode::Colors => {
            let mut colors = Vec::new();
            for token in extract_tokens(text) {
                match check_color(&token.text) {
                    Ok(parsed) => colors.push(parsed),
                    Err(err) => {
                        tracing::debug!(path = %path.display(), line = token.line, "{err}");
                        rejected.push(token);
                    }
                }
            }
            Extracted::Colors(colors)
        }
        SearchMode::Variables => Extracted::Variables(VariableTable::from_source(text)),
    };

    FileExtraction {
        path: path.to_path_buf(),
        extracted,
        rejected,
    }
}

/// Owns the color registry and variable tables for one run.
#[derive(Debug, Default)]
pub struct Aggregator {
    mode: SearchMode,
    registry: ColorRegistry,
    variables: Vec<(PathBuf, VariableTable)>,
    files: Vec<PathBuf>,
    rejected: usize,
}

impl Aggregator {
    /// Create an empty aggregator for `mode`.
    #[must_use]
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// The run's mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Merge one file's extraction.
    pub fn add(&mut self, extraction: FileExtraction) {
        let FileExtraction {
            path,
            extracted,
            rejected,
        } = extraction;
        self.rejected += rejected.len();

        match extracted {
            Extracted::Colors(colors) => {
                for parsed in &colors {
                    let _ = self.registry.record(parsed, &path);
                }
            }
            Extracted::Variables(table) => {
                if !table.is_empty() {
                    self.variables.push((path.clone(), table));
                }
            }
        }

        self.files.push(path);
    }

    /// Extract and merge in one step.
    pub fn ingest(&mut self, path: &Path, text: &str) {
        self.add(extract_file(self.mode, path, text));
    }

    /// Files merged so far, in the order they were added.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of tokens dropped as malformed.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.rejected
    }

    /// The color registry built so far.
    #[must_use]
    pub const fn registry(&self) -> &ColorRegistry {
        &self.registry
    }

    /// Rank, filter and package the results.
    ///
    /// `threshold` is the minimum occurrence count for a color to be kept;
    /// `0` keeps everything. It does not apply to variables.
    #[must_use]
    pub fn finish(self, threshold: usize) -> Report {
        match self.mode {
            SearchMode::Colors => {
                let total = self.registry.len();
                let (mut keywords, mut colors): (Vec<ColorEntry>, Vec<ColorEntry>) = self
                    .registry
                    .into_entries()
                    .into_iter()
                    .partition(|entry| matches!(entry.color, CanonicalColor::Keyword(_)));

                let filtered_out = filter_by_popularity(&mut colors, threshold)
                    + filter_by_popularity(&mut keywords, threshold);
                sort_swatches(&mut colors);
                sort_swatches(&mut keywords);

                Report::Colors(ColorReport {
                    colors,
                    keywords,
                    total,
                    filtered_out,
                    files_scanned: self.files.len(),
                })
            }
            SearchMode::Variables => {
                let files = self
                    .variables
                    .into_iter()
                    .map(|(path, table)| FileVariables::new(path, &table))
                    .collect();
                Report::Variables(VariablesReport {
                    files,
                    files_scanned: self.files.len(),
                })
            }
        }
    }
}

/// Final output of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Report {
    /// Result of a colors run.
    Colors(ColorReport),
    /// Result of a variables run.
    Variables(VariablesReport),
}

impl Report {
    /// Number of files that contributed.
    #[must_use]
    pub const fn files_scanned(&self) -> usize {
        match self {
            Self::Colors(report) => report.files_scanned,
            Self::Variables(report) => report.files_scanned,
        }
    }
}

/// Ranked colors across all files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorReport {
    /// Numeric colors, sorted.
    pub colors: Vec<ColorEntry>,
    /// `transparent` / `currentcolor`, reported separately.
    pub keywords: Vec<ColorEntry>,
    /// Distinct colors before the popularity filter.
    pub total: usize,
    /// Distinct colors removed by the popularity filter.
    pub filtered_out: usize,
    /// Files processed.
    pub files_scanned: usize,
}

/// Variables grouped by the file that declares them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesReport {
    /// Files with at least one declaration, in traversal order.
    pub files: Vec<FileVariables>,
    /// Files processed.
    pub files_scanned: usize,
}

/// One file's variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVariables {
    /// Declaring file.
    pub path: PathBuf,
    /// Color-valued variables, sorted like colors.
    pub color_variables: Vec<ResolvedVariable>,
    /// Everything else, in declaration order.
    pub other_values: Vec<ResolvedVariable>,
}

impl FileVariables {
    fn new(path: PathBuf, table: &VariableTable) -> Self {
        let mut color_variables: Vec<ResolvedVariable> = table.colors().cloned().collect();
        sort_swatches(&mut color_variables);
        Self {
            path,
            color_variables,
            other_values: table.others().cloned().collect(),
        }
    }
}
