//! The narrow filesystem surface the scan needs.
//!
//! Everything the walker and driver touch goes through [`FileSystem`], so
//! tests can substitute an in-memory tree with controlled timestamps.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{Result, ScanError};

/// What a path points at, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symlink, socket, device, ...; never scanned.
    Other,
}

/// Result of [`FileSystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    /// Entry type.
    pub kind: EntryKind,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

/// Filesystem operations used by a scan.
///
/// Implementations must be shareable across the worker threads.
pub trait FileSystem: Sync {
    /// Names of the entries directly inside `dir`, in any order.
    ///
    /// # Errors
    ///
    /// [`ScanError::Io`] when the directory cannot be listed.
    fn list_entries(&self, dir: &Path) -> Result<Vec<OsString>>;

    /// Stat `path` without following a final symlink.
    ///
    /// # Errors
    ///
    /// [`ScanError::Io`] when the path cannot be stat'ed.
    fn stat(&self, path: &Path) -> Result<EntryStat>;

    /// Read a whole file as text.
    ///
    /// # Errors
    ///
    /// [`ScanError::Io`] when the file cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_entries(&self, dir: &Path) -> Result<Vec<OsString>> {
        let entries = fs::read_dir(dir).map_err(|e| ScanError::io(dir, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScanError::io(dir, e))?;
            names.push(entry.file_name());
        }
        Ok(names)
    }

    fn stat(&self, path: &Path) -> Result<EntryStat> {
        let meta = fs::symlink_metadata(path).map_err(|e| ScanError::io(path, e))?;
        let file_type = meta.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        Ok(EntryStat {
            kind,
            modified: meta.modified().ok(),
        })
    }

    /// Invalid UTF-8 is replaced rather than rejected.
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| ScanError::io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.css");
        fs::write(&file, "a {}").unwrap();

        assert_eq!(OsFileSystem.stat(dir.path()).unwrap().kind, EntryKind::Dir);
        let stat = OsFileSystem.stat(&file).unwrap();
        assert_eq!(stat.kind, EntryKind::File);
        assert!(stat.modified.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real");
        fs::create_dir(&target).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(OsFileSystem.stat(&link).unwrap().kind, EntryKind::Other);
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let err = OsFileSystem.stat(Path::new("/definitely/not/here")).unwrap_err();
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("/definitely/not/here"));
    }

    #[test]
    fn test_lossy_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("latin1.css");
        fs::write(&file, b"a { content: \"\xe9\"; color: #fff; }").unwrap();
        let text = OsFileSystem.read_to_string(&file).unwrap();
        assert!(text.contains("#fff"));
    }
}
