//! Integration tests for candidate file discovery.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use huescan_common::Diagnostics;
use huescan_scan::{
    DateCutoff, EntryKind, EntryStat, FileSystem, OsFileSystem, ScanConfig, ScanError,
    collect_files,
};

/// In-memory tree with explicit modification times.
#[derive(Default)]
struct MemoryFs {
    entries: BTreeMap<PathBuf, (EntryKind, SystemTime)>,
}

impl MemoryFs {
    fn add(&mut self, path: &str, kind: EntryKind, modified: SystemTime) {
        let _ = self.entries.insert(PathBuf::from(path), (kind, modified));
    }
}

impl FileSystem for MemoryFs {
    fn list_entries(&self, dir: &Path) -> Result<Vec<OsString>, ScanError> {
        if !matches!(self.entries.get(dir), Some((EntryKind::Dir, _))) {
            return Err(ScanError::io(dir, io::ErrorKind::NotFound.into()));
        }
        Ok(self
            .entries
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name().map(ToOwned::to_owned))
            .rev()
            .collect())
    }

    fn stat(&self, path: &Path) -> Result<EntryStat, ScanError> {
        self.entries
            .get(path)
            .map(|&(kind, modified)| EntryStat {
                kind,
                modified: Some(modified),
            })
            .ok_or_else(|| ScanError::io(path, io::ErrorKind::NotFound.into()))
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ScanError> {
        Err(ScanError::io(path, io::ErrorKind::Unsupported.into()))
    }
}

fn names(files: &[PathBuf]) -> Vec<String> {
    files.iter().map(|p| p.display().to_string()).collect()
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "a { color: #fff; }").unwrap();
}

#[test]
fn test_walk_order_is_sorted_depth_first() {
    let dir = tempfile::tempdir().unwrap();
    for rel in ["b.css", "a.css", "z/one.css", "m/two.css", "m/deep/three.css"] {
        touch(dir.path(), rel);
    }

    let mut diagnostics = Diagnostics::new();
    let files = collect_files(&OsFileSystem, &ScanConfig::for_root(dir.path()), &mut diagnostics);
    let rel: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();
    assert_eq!(rel, ["a.css", "b.css", "m/two.css", "m/deep/three.css", "z/one.css"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_dot_entries_extensions_and_ignores() {
    let dir = tempfile::tempdir().unwrap();
    for rel in [
        ".hidden.css",
        ".git/x.css",
        "keep.SCSS",
        "notes.txt",
        "old-staff.css",
        "old-version/a.css",
        "ok/b.less",
    ] {
        touch(dir.path(), rel);
    }

    let config = ScanConfig {
        extensions: vec![".css".into(), ".scss".into(), ".less".into()],
        ignore_dirs: vec!["/old-version".into()],
        ignore_files: vec!["old-staff".into()],
        ..ScanConfig::for_root(dir.path())
    };
    let files = collect_files(&OsFileSystem, &config, &mut Diagnostics::new());
    let rel: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();
    assert_eq!(rel, ["keep.SCSS", "ok/b.less"]);
}

#[test]
fn test_missing_root_is_recovered() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.css");

    let config = ScanConfig {
        roots: vec![dir.path().to_path_buf(), dir.path().join("gone")],
        ..ScanConfig::for_root(dir.path())
    };
    let mut diagnostics = Diagnostics::new();
    let files = collect_files(&OsFileSystem, &config, &mut diagnostics);
    assert_eq!(files.len(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.into_issues()[0].message.contains("gone"));
}

#[test]
fn test_date_cutoff_skips_old_walked_files() {
    let old = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400 * 365);
    let new = SystemTime::now();

    let mut fs = MemoryFs::default();
    fs.add("/s", EntryKind::Dir, new);
    fs.add("/s/old.css", EntryKind::File, old);
    fs.add("/s/new.css", EntryKind::File, new);
    fs.add("/s/link.css", EntryKind::Other, new);

    let config = ScanConfig {
        cutoff: Some(DateCutoff::new(2000, 1, 1).unwrap()),
        files: vec![PathBuf::from("/s/old.css")],
        ..ScanConfig::for_root("/s")
    };
    let files = collect_files(&fs, &config, &mut Diagnostics::new());
    // The hand-picked old file is exempt and comes first.
    assert_eq!(names(&files), ["/s/old.css", "/s/new.css"]);
}

#[test]
fn test_roots_are_walked_last_first() {
    let now = SystemTime::now();
    let mut fs = MemoryFs::default();
    for dir in ["/a", "/b"] {
        fs.add(dir, EntryKind::Dir, now);
    }
    fs.add("/a/x.css", EntryKind::File, now);
    fs.add("/b/y.css", EntryKind::File, now);

    let config = ScanConfig {
        roots: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        ..ScanConfig::for_root("/unused")
    };
    let files = collect_files(&fs, &config, &mut Diagnostics::new());
    assert_eq!(names(&files), ["/b/y.css", "/a/x.css"]);
}

#[test]
fn test_hand_picked_directory_is_an_issue() {
    let now = SystemTime::now();
    let mut fs = MemoryFs::default();
    fs.add("/s", EntryKind::Dir, now);

    let config = ScanConfig {
        roots: Vec::new(),
        files: vec![PathBuf::from("/s"), PathBuf::from("/nope.css")],
        ..ScanConfig::for_root("/unused")
    };
    let mut diagnostics = Diagnostics::new();
    assert!(collect_files(&fs, &config, &mut diagnostics).is_empty());
    assert_eq!(diagnostics.len(), 2);
}
