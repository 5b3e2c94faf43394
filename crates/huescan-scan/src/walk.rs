//! Candidate file discovery.
//!
//! Directories are walked from an explicit stack, never by recursion. Each
//! directory's entries are sorted by name before they are looked at, so the
//! resulting file list (and with it every "first seen" value in a report)
//! is the same from run to run.

use std::collections::HashSet;
use std::path::PathBuf;

use huescan_common::Diagnostics;

use crate::config::ScanConfig;
use crate::fs::{EntryKind, FileSystem};

/// List the files a scan should read, in processing order.
///
/// Hand-picked files come first, in the order given, then the contents of
/// each root. A file reached twice is only listed once. Directory and stat
/// failures are recorded in `diagnostics` and the entry is skipped.
pub fn collect_files<F>(fs: &F, config: &ScanConfig, diagnostics: &mut Diagnostics) -> Vec<PathBuf>
where
    F: FileSystem + ?Sized,
{
    let mut files = Vec::new();
    let mut seen = HashSet::new();
    let mut keep = |path: PathBuf, files: &mut Vec<PathBuf>| {
        if seen.insert(path.clone()) {
            files.push(path);
        }
    };

    for path in &config.files {
        match fs.stat(path) {
            Ok(stat) if stat.kind == EntryKind::File => {
                if !config.ignores_file(path) && config.allows_extension(path) {
                    keep(path.clone(), &mut files);
                }
            }
            Ok(_) => {
                let _ = diagnostics.warn_once("walk", format!("'{}' is not a file", path.display()));
            }
            Err(err) => {
                let _ = diagnostics.warn_once("walk", err.to_string());
            }
        }
    }

    let mut stack = config.roots.clone();
    while let Some(dir) = stack.pop() {
        let mut names = match fs.list_entries(&dir) {
            Ok(names) => names,
            Err(err) => {
                let _ = diagnostics.warn_once("walk", err.to_string());
                continue;
            }
        };
        names.retain(|name| !name.to_string_lossy().starts_with('.'));
        names.sort();

        let mut subdirs = Vec::new();
        for name in names {
            let path = dir.join(&name);
            let stat = match fs.stat(&path) {
                Ok(stat) => stat,
                Err(err) => {
                    let _ = diagnostics.warn_once("walk", err.to_string());
                    continue;
                }
            };

            match stat.kind {
                EntryKind::Dir if config.ignores_dir(&path) => {
                    tracing::debug!(path = %path.display(), "ignored directory");
                }
                EntryKind::Dir => subdirs.push(path),
                EntryKind::File => {
                    if config.ignores_file(&path) || !config.allows_extension(&path) {
                        continue;
                    }
                    let fresh = match (config.cutoff, stat.modified) {
                        (Some(cutoff), Some(modified)) => cutoff.admits(modified),
                        _ => true,
                    };
                    if fresh {
                        keep(path, &mut files);
                    } else {
                        tracing::trace!(path = %path.display(), "older than cutoff");
                    }
                }
                EntryKind::Other => {
                    tracing::trace!(path = %path.display(), "not a regular file or directory");
                }
            }
        }

        // Reversed so the first subdirectory by name is popped next.
        stack.extend(subdirs.into_iter().rev());
    }

    tracing::info!("found {} files to scan", files.len());
    files
}
