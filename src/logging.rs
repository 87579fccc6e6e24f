//! Diagnostic logging to stderr.
//!
//! User-facing output goes through `println!`; this is for `tracing` events
//! from the core library.

use std::env;
use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Checked before RUST_LOG, e.g. SHEETCAL_LOG=sheetcal_core=debug
static LOG_ENV: &str = "SHEETCAL_LOG";

/// Install the global subscriber. `verbosity` is the number of `-v` flags and
/// only sets the level used when no filter is given in the environment.
pub fn init(verbosity: u8) -> Result<()> {
    let filter = build_filter(verbosity)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logging subscriber: {e}"))
}

fn build_filter(verbosity: u8) -> Result<EnvFilter> {
    if let Ok(directives) = env::var(LOG_ENV)
        && !directives.trim().is_empty()
    {
        return Ok(EnvFilter::try_new(directives)?);
    }

    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_level(verbosity))?),
    }
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
