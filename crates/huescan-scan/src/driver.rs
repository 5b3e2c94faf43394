//! The extraction driver: walk, read and extract in parallel, aggregate on
//! one thread.
//!
//! Workers share nothing mutable. Each one claims the next file index, reads
//! and extracts the file, and sends the pure result back over a channel. The
//! calling thread is the only writer: it buffers results that arrive early
//! and applies them to the [`Aggregator`] strictly in file order.
//!
//! Reads never run more than `workers` files ahead of the last applied one,
//! so the reorder buffer holds fewer than `workers` results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError, mpsc};
use std::thread;

use huescan_common::{Diagnostics, Issue};
use huescan_css::{Aggregator, FileExtraction, Report, SearchMode, extract_file};
use serde::Serialize;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::fs::{FileSystem, OsFileSystem};
use crate::walk::collect_files;

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    /// Ranked and filtered results.
    pub report: Report,
    /// Files that were read and extracted, in processing order.
    pub files: Vec<PathBuf>,
    /// Problems that were recovered from.
    pub issues: Vec<Issue>,
}

/// Run a scan against the real filesystem.
#[must_use]
pub fn scan(config: &ScanConfig) -> ScanOutcome {
    scan_with(&OsFileSystem, config)
}

/// Run a scan against any [`FileSystem`].
#[must_use]
pub fn scan_with<F>(fs: &F, config: &ScanConfig) -> ScanOutcome
where
    F: FileSystem + ?Sized,
{
    let mut diagnostics = Diagnostics::new();
    let candidates = collect_files(fs, config, &mut diagnostics);

    let mut aggregator = Aggregator::new(config.mode);
    extract_all(fs, config.mode, &candidates, config.workers, |index, result| {
        match result {
            Ok(extraction) => aggregator.add(extraction),
            Err(err) => {
                tracing::debug!(index, "read failed");
                let _ = diagnostics.warn_once("read", err.to_string());
            }
        }
    });

    if !diagnostics.is_empty() {
        tracing::info!("recovered from {} problems", diagnostics.len());
    }

    let files = aggregator.files().to_vec();
    if aggregator.rejected() > 0 {
        tracing::info!("dropped {} malformed color tokens", aggregator.rejected());
    }
    let report = aggregator.finish(config.popularity_threshold);
    tracing::info!("scanned {} of {} files", files.len(), candidates.len());

    ScanOutcome {
        report,
        files,
        issues: diagnostics.into_issues(),
    }
}

fn read_and_extract<F>(fs: &F, mode: SearchMode, path: &Path) -> Result<FileExtraction>
where
    F: FileSystem + ?Sized,
{
    let text = fs.read_to_string(path)?;
    Ok(extract_file(mode, path, &text))
}

/// Extract `files` on up to `workers` threads, calling `apply` once per
/// file in index order on the calling thread.
fn extract_all<F, A>(fs: &F, mode: SearchMode, files: &[PathBuf], workers: usize, mut apply: A)
where
    F: FileSystem + ?Sized,
    A: FnMut(usize, Result<FileExtraction>),
{
    if files.is_empty() {
        return;
    }
    let workers = workers.clamp(1, files.len());
    let next = AtomicUsize::new(0);
    let window = Window::new(workers);
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let (next, window) = (&next, &window);
            let _ = scope.spawn(move || {
                let _close = CloseOnPanic(window);
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(path) = files.get(index) else { break };
                    if !window.admit(index) {
                        break;
                    }
                    if tx.send((index, read_and_extract(fs, mode, path))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let _close = CloseOnPanic(&window);
        let mut pending = BTreeMap::new();
        let mut next_apply = 0;
        for (index, result) in rx {
            let _ = pending.insert(index, result);
            while let Some(result) = pending.remove(&next_apply) {
                apply(next_apply, result);
                next_apply += 1;
                window.advance(next_apply);
            }
        }
    });
}

/// How far ahead of the apply cursor workers may read.
struct Window {
    state: Mutex<WindowState>,
    moved: Condvar,
    size: usize,
}

struct WindowState {
    applied: usize,
    closed: bool,
}

impl Window {
    const fn new(size: usize) -> Self {
        Self {
            state: Mutex::new(WindowState {
                applied: 0,
                closed: false,
            }),
            moved: Condvar::new(),
            size,
        }
    }

    fn lock(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until `index` is inside the window. `false` once the run is torn down.
    fn admit(&self, index: usize) -> bool {
        let mut state = self.lock();
        while !state.closed && index >= state.applied + self.size {
            state = self.moved.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
        !state.closed
    }

    fn advance(&self, applied: usize) {
        self.lock().applied = applied;
        self.moved.notify_all();
    }

    fn close(&self) {
        self.lock().closed = true;
        self.moved.notify_all();
    }
}

/// Releases waiting workers if its thread unwinds, so the scope can join.
struct CloseOnPanic<'a>(&'a Window);

impl Drop for CloseOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.close();
        }
    }
}
