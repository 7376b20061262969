//! Blockwatch: reports when a node has stopped producing blocks.
//!
//! Meant to be invoked periodically by an external scheduler. A detected stall
//! or any failure exits non-zero with a message; persistence of the last
//! observed block is what carries state between runs.

mod cli;
mod flags;
mod telemetry;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run().await
}
