// src/logging.rs
// =============================================================================
// Sets up structured logging with `tracing-subscriber`.
//
// Logs always go to stderr: stdout is reserved for the link list, so the
// output can be piped into other tools untouched.
//
// The filter comes from RUST_LOG (e.g. RUST_LOG=spider_web=debug) and
// defaults to "warn", which keeps a normal run silent.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

pub fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    tracing::debug!("logging initialized");
    Ok(())
}
