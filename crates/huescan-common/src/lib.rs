//! Common utilities for huescan.
//!
//! This crate provides shared infrastructure used by all huescan components:
//! - **Diagnostics** - per-run collection of recovered problems, logged once each
//! - **Logging** - `tracing` subscriber setup for binaries and tests

pub mod diagnostics;
pub mod logging;

pub use diagnostics::{Diagnostics, Issue};
