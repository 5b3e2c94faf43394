//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

/// Map `-q` / `-v` counts to a default filter directive.
#[must_use]
pub const fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when it is set and valid; otherwise the level derived from
/// the verbosity flags is used. Installing twice is harmless (the second call
/// is ignored), which keeps tests that share a process from fighting.
pub fn init(verbose: u8, quiet: bool) {
    let level = default_level(verbose, quiet);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(level))
                .unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
