// src/logging.rs
// Log setup for the binary: human-readable lines on stderr so stdout is left
// to the rendered report. RUST_LOG wins when set; otherwise the level is
// "info", or "debug" with --verbose.

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}
