//! Flags for the stall check.

use anyhow::{Context, Result, bail};
use blockwatch_monitor::{Decision, RpcClient, StallCheck, StateStore};
use clap::Args;
use std::{path::PathBuf, time::Duration};
use tracing::info;
use url::Url;

/// Stall-check configuration arguments.
#[derive(Args, Clone, Debug)]
pub struct WatchArgs {
    /// Path of the local state file recording the last observed block.
    #[arg(long, env = "BLOCKWATCH_FILE", default_value_os_t = default_state_file())]
    pub file: PathBuf,

    /// JSON-RPC HTTP endpoint of the node under observation.
    #[arg(long, env = "BLOCKWATCH_RPC", default_value = "http://localhost:8545")]
    pub rpc: Url,

    /// Deadline for the JSON-RPC request, in seconds.
    #[arg(long, env = "BLOCKWATCH_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Report the node as stalled when it has sat on the same block for more
    /// than this many seconds.
    #[arg(long, env = "BLOCKWATCH_STALLED", default_value_t = 120)]
    pub stalled: u64,
}

/// Default state file location, under the OS temp directory.
fn default_state_file() -> PathBuf {
    std::env::temp_dir().join("blockwatch-latest.json")
}

impl WatchArgs {
    /// Builds the check from the flags and runs it once.
    ///
    /// A detected stall is surfaced as an error so the process exits non-zero.
    pub async fn execute(self) -> Result<()> {
        let client = RpcClient::new(self.rpc, Duration::from_secs(self.timeout))
            .context("failed to build the rpc client")?;
        let store = StateStore::new(self.file);
        let check = StallCheck::new(client, store, Duration::from_secs(self.stalled));

        match check.execute().await.context("stall check failed")? {
            Decision::Stalled { number, elapsed } => {
                bail!(
                    "node is stalled at block {number}, no progress for {}s",
                    elapsed.as_secs()
                )
            }
            Decision::Advanced { baseline } => {
                info!(target: "blockwatch", block = %baseline.number, "node is progressing");
                Ok(())
            }
            Decision::Holding { number, elapsed } => {
                info!(
                    target: "blockwatch",
                    block = %number,
                    elapsed_secs = elapsed.as_secs(),
                    "node is holding on the tracked block, within threshold"
                );
                Ok(())
            }
        }
    }
}
