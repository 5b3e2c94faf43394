//! Machine-readable output.

use std::path::PathBuf;

use huescan_scan::ScanOutcome;

use crate::error::Result;

/// The full outcome (report, processed files and issues) as pretty JSON.
///
/// # Errors
///
/// [`crate::ReportError::Json`] when serialization fails.
pub fn render_json(outcome: &ScanOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// The list of processed files, tab-indented.
///
/// # Errors
///
/// [`crate::ReportError::Json`] when serialization fails.
pub fn render_files(files: &[PathBuf]) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    serde::Serialize::serialize(files, &mut ser)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_list() {
        let json = render_files(&[PathBuf::from("a.css"), PathBuf::from("b/c.less")]).unwrap();
        assert_eq!(json, "[\n\t\"a.css\",\n\t\"b/c.less\"\n]");
    }
}
