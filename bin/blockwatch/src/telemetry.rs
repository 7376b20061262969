//! Telemetry initialization for the blockwatch binary.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing stack.
///
/// The verbosity count maps 0 to `INFO`, 1 to `DEBUG`, and 2 or more to
/// `TRACE`. A `RUST_LOG` value in the environment overrides the mapping.
pub fn init(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}
