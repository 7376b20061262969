//! Contains the blockwatch CLI.

use crate::{flags::WatchArgs, telemetry};
use anyhow::Result;
use clap::{ArgAction, Parser};

/// The blockwatch CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (0-2)
    #[arg(long, short, action = ArgAction::Count)]
    pub v: u8,
    /// Arguments for the stall check.
    #[command(flatten)]
    pub watch: WatchArgs,
}

impl Cli {
    /// Runs the CLI.
    pub async fn run(self) -> Result<()> {
        telemetry::init(self.v)?;
        self.watch.execute().await
    }
}
