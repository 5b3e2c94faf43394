//! Ranked swatches for the terminal.

use std::fmt::Write as _;

use huescan_scan::ScanOutcome;
use owo_colors::OwoColorize;

use crate::view::{ReportView, SwatchView};

const CHIP: &str = "      ";

fn chip(swatch: &SwatchView, color: bool) -> String {
    match swatch.rgb {
        Some((r, g, b)) if color => CHIP.on_truecolor(r, g, b).to_string(),
        _ => CHIP.to_string(),
    }
}

fn swatch_line(out: &mut String, swatch: &SwatchView, color: bool) {
    let name = swatch
        .name
        .as_deref()
        .map(|n| format!("{n}: "))
        .unwrap_or_default();
    let counter = swatch.counter();
    let counter = if color {
        counter.dimmed().to_string()
    } else {
        counter
    };
    let _ = writeln!(out, "  {} {name}{:<28} {counter}", chip(swatch, color), swatch.label);
}

fn heading(out: &mut String, text: &str, color: bool) {
    if color {
        let _ = writeln!(out, "{}", text.bold());
    } else {
        let _ = writeln!(out, "{text}");
    }
}

/// Render a scan for a terminal. `color` enables ANSI styling and
/// true-color swatches.
#[must_use]
pub fn render_terminal(outcome: &ScanOutcome, color: bool) -> String {
    let view = ReportView::new(&outcome.report);
    let mut out = String::new();

    if view.mode == "colors" {
        heading(&mut out, "Colors", color);
        for swatch in &view.swatches {
            swatch_line(&mut out, swatch, color);
        }
        if !view.keywords.is_empty() {
            heading(&mut out, "Keywords", color);
            for swatch in &view.keywords {
                swatch_line(&mut out, swatch, color);
            }
        }
    } else {
        for file in &view.files {
            heading(&mut out, &file.path, color);
            for swatch in &file.colors {
                swatch_line(&mut out, swatch, color);
            }
            for value in &file.values {
                let _ = writeln!(out, "  {CHIP} {}: {}", value.name, value.value);
            }
        }
    }

    if !outcome.issues.is_empty() {
        heading(&mut out, "Skipped", color);
        for issue in &outcome.issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }

    let _ = writeln!(out, "{}", summary(&view));
    out
}

/// One-line summary of a run.
#[must_use]
pub fn summary(view: &ReportView) -> String {
    if view.mode == "colors" {
        let mut line = format!(
            "{} colors, {} keywords in {} files",
            view.swatches.len(),
            view.keywords.len(),
            view.files_scanned
        );
        if view.filtered_out > 0 {
            let _ = write!(line, " ({} below the popularity threshold)", view.filtered_out);
        }
        line
    } else {
        format!(
            "{} files with variables in {} files",
            view.files.len(),
            view.files_scanned
        )
    }
}
