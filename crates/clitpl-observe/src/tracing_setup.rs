//! Tracing subscriber initialization with structured logging to stderr.
//!
//! # Usage
//!
//! ```no_run
//! // Warnings and errors only, unless RUST_LOG says otherwise
//! clitpl_observe::tracing_setup::init_tracing("warn").unwrap();
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable consulted before `default_filter`.
pub const LOG_ENV: &str = "RUST_LOG";

/// Map `--quiet` / `-v` counts to a filter directive.
pub fn verbosity_filter(quiet: bool, verbose: u8) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,clitpl=debug",
        _ => "trace",
    }
}

/// Build the filter: `RUST_LOG` when set and parseable, else `default_filter`.
pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize the global tracing subscriber.
///
/// Installs a `fmt` layer writing to stderr so stdout stays free for
/// command output such as generated completions.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(build_filter(default_filter))
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
