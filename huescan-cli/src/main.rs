//! huescan command-line interface
//!
//! Scans a stylesheet tree, ranks the colors (or style variables) it uses and
//! writes a report.
//!
//! - huescan styles/                      # HTML report in ./huescan-report
//! - huescan --format terminal styles/    # print swatches instead
//! - huescan --config huescan.json        # settings from a file

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use huescan_common::logging;
use huescan_css::SearchMode;
use huescan_report::{OutputFormat, ReportView, render_terminal, summary, write_reports};
use huescan_scan::{ConfigFile, NotOlderThan, ScanConfig, scan};
use owo_colors::OwoColorize;

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "huescan.json";

/// huescan - find, normalize and rank the colors used across a stylesheet tree
#[derive(Parser, Debug)]
#[command(name = "huescan")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Colors used under styles/, as an HTML page
    huescan styles/

    # Only .scss and .less files changed since March 2023
    huescan --ext .scss --ext .less --not-older-than 2023-03 styles/

    # Variables declared per file, printed to the terminal
    huescan --mode variables --format terminal styles/

    # Colors used at least three times, as JSON
    huescan --popularity 3 --format json --output out/ styles/
"#)]
struct Cli {
    /// Directories to scan. The last one is scanned first.
    #[arg(value_name = "ROOT")]
    roots: Vec<PathBuf>,

    /// JSON config file (defaults to ./huescan.json when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// What to look for: colors or variables
    #[arg(short, long, value_name = "MODE")]
    mode: Option<SearchMode>,

    /// Only scan files with this extension (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Skip directories whose path contains this text (repeatable)
    #[arg(long, value_name = "TEXT")]
    ignore_dir: Vec<String>,

    /// Skip files whose path contains this text (repeatable)
    #[arg(long, value_name = "TEXT")]
    ignore_file: Vec<String>,

    /// Skip files last modified before this date
    #[arg(long, value_name = "YYYY[-MM[-DD]]")]
    not_older_than: Option<NotOlderThan>,

    /// Only report colors seen at least this many times (0 disables)
    #[arg(short, long, value_name = "N")]
    popularity: Option<usize>,

    /// Number of files read in parallel
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Directory reports are written to
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Report format: html, json or terminal
    #[arg(short, long, value_name = "FORMAT", default_value = "html")]
    format: OutputFormat,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors and print nothing but the report
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Settings given on the command line, as a config layer.
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            set_dirs_to_parse: self.roots.clone(),
            file_extensions: self.extensions.clone(),
            search_for: self.mode,
            not_older_than: self.not_older_than.clone(),
            popularity_threshold: self.popularity,
            ignore_dirs: self.ignore_dir.clone(),
            ignore_files: self.ignore_file.clone(),
            output_dir: self.output.clone(),
            workers: self.workers,
            ..ConfigFile::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Must fail before anything is written.
    let config = load_config(&cli, Path::new(DEFAULT_CONFIG))?;
    tracing::debug!(?config, "resolved configuration");

    let outcome = scan(&config);
    let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    if cli.format == OutputFormat::Terminal {
        print!("{}", render_terminal(&outcome, color));
    }

    let written = write_reports(&outcome, &config.output_dir, cli.format).with_context(|| {
        format!("failed to write reports to '{}'", config.output_dir.display())
    })?;

    if !cli.quiet && cli.format != OutputFormat::Terminal {
        println!("{}", summary(&ReportView::new(&outcome.report)));
        for path in &written {
            if color {
                println!("{} {}", "wrote".green(), path.display());
            } else {
                println!("wrote {}", path.display());
            }
        }
    }

    Ok(())
}

/// Merge the config file (explicit, or `fallback` when it exists) with the
/// command-line flags and validate the result.
fn load_config(cli: &Cli, fallback: &Path) -> anyhow::Result<ScanConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| fallback.is_file().then(|| fallback.to_path_buf()));

    let file = match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            ConfigFile::load(&path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?
        }
        None => ConfigFile::default(),
    };

    Ok(file.merge(cli.overrides()).resolve()?)
}
