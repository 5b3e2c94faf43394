//! Report rendering for huescan.
//!
//! # Outputs
//!
//! - **HTML** - a standalone page with one swatch per color, rendered from an
//!   embedded `minijinja` template
//! - **JSON** - the full scan outcome, plus `files.json` with the processed files
//! - **Terminal** - ranked true-color swatches and a summary line

/// Report errors.
pub mod error;
/// HTML output.
pub mod html;
/// JSON output.
pub mod json;
/// Terminal output.
pub mod terminal;
/// Format-independent views of a report.
pub mod view;

use std::fs;
use std::path::{Path, PathBuf};

use huescan_scan::ScanOutcome;
use serde::Serialize;
use strum_macros::{Display, EnumString};

pub use error::ReportError;
pub use html::render_html;
pub use json::{render_files, render_json};
pub use terminal::{render_terminal, summary};
pub use view::ReportView;

use crate::error::Result;

/// File name of the HTML report.
pub const HTML_FILE: &str = "index.html";
/// File name of the JSON report.
pub const JSON_FILE: &str = "report.json";
/// File name of the processed-file list.
pub const FILES_FILE: &str = "files.json";

/// Report flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `index.html`
    #[default]
    Html,
    /// `report.json`
    Json,
    /// Printed to stdout; only `files.json` is written.
    Terminal,
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf> {
    fs::write(&path, contents).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(path)
}

/// Write the report files for `format` into `dir`, creating it if needed.
///
/// `files.json` is always written. Returns the paths written.
///
/// # Errors
///
/// [`ReportError::Io`] when the directory or a file cannot be written, and
/// template or JSON errors from rendering.
pub fn write_reports(outcome: &ScanOutcome, dir: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    match format {
        OutputFormat::Html => {
            let html = render_html(outcome, "huescan")?;
            written.push(write_file(dir.join(HTML_FILE), &html)?);
        }
        OutputFormat::Json => {
            written.push(write_file(dir.join(JSON_FILE), &render_json(outcome)?)?);
        }
        OutputFormat::Terminal => {}
    }
    written.push(write_file(dir.join(FILES_FILE), &render_files(&outcome.files)?)?);
    Ok(written)
}
