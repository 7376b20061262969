//! The stall decision and the single-shot check driver.

use crate::{BlockRecord, MonitorResult, RpcClient, StateStore};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of comparing the persisted baseline against a fresh fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The chain advanced past the baseline, or there was no baseline yet.
    /// The fetched record becomes the new baseline.
    Advanced {
        /// The fetched head, persisted as the new baseline.
        baseline: BlockRecord,
    },
    /// The node still reports the baseline block, within the threshold.
    Holding {
        /// The block number both records agree on.
        number: String,
        /// How long the node has reported this number.
        elapsed: Duration,
    },
    /// The node has reported the baseline block for longer than the threshold.
    Stalled {
        /// The block number the node is stuck at.
        number: String,
        /// How long the node has reported this number.
        elapsed: Duration,
    },
}

impl Decision {
    /// Pure decision rule over the local baseline and a fresh fetch.
    ///
    /// Elapsed time is measured between the two observation timestamps and
    /// clamps to zero if the host clock stepped backwards between runs.
    pub fn evaluate(
        local: Option<&BlockRecord>,
        remote: &BlockRecord,
        threshold: Duration,
    ) -> Self {
        let Some(local) = local else {
            return Self::Advanced { baseline: remote.clone() };
        };
        if local.number != remote.number {
            return Self::Advanced { baseline: remote.clone() };
        }

        let elapsed = (remote.observed_at - local.observed_at).to_std().unwrap_or_default();
        if elapsed > threshold {
            Self::Stalled { number: remote.number.clone(), elapsed }
        } else {
            Self::Holding { number: remote.number.clone(), elapsed }
        }
    }
}

/// A single-shot stall check against one node.
///
/// Runs strictly sequentially: load the baseline, fetch the head, decide, and
/// persist only when the chain advanced. A failed fetch aborts the run without
/// touching local state.
#[derive(Debug)]
pub struct StallCheck {
    /// Client for the watched node.
    client: RpcClient,
    /// Store holding the persisted baseline.
    store: StateStore,
    /// Threshold above which an unchanged block number is reported as a stall.
    threshold: Duration,
}

impl StallCheck {
    /// Creates a new [`StallCheck`].
    pub const fn new(client: RpcClient, store: StateStore, threshold: Duration) -> Self {
        Self { client, store, threshold }
    }

    /// Runs the check once and returns the [`Decision`].
    pub async fn execute(&self) -> MonitorResult<Decision> {
        let local = self.store.load()?;
        let remote = self.client.latest_block().await?;
        self.settle(local, remote)
    }

    /// Applies the decision rule and persists the new baseline when the chain
    /// advanced.
    ///
    /// `Holding` and `Stalled` leave the state file untouched: the baseline
    /// timestamp anchors "since when have we seen this block number" and must
    /// keep accumulating elapsed time across runs.
    fn settle(&self, local: Option<BlockRecord>, remote: BlockRecord) -> MonitorResult<Decision> {
        let decision = Decision::evaluate(local.as_ref(), &remote, self.threshold);
        match &decision {
            Decision::Advanced { baseline } => {
                self.store.save(baseline)?;
                info!(
                    target: "blockwatch",
                    block = %baseline.number,
                    "chain advanced, baseline updated"
                );
            }
            Decision::Holding { number, elapsed } => {
                debug!(
                    target: "blockwatch",
                    block = %number,
                    elapsed_secs = elapsed.as_secs(),
                    "no progress since baseline, within threshold"
                );
            }
            Decision::Stalled { number, elapsed } => {
                warn!(
                    target: "blockwatch",
                    block = %number,
                    elapsed_secs = elapsed.as_secs(),
                    "node is stalled"
                );
            }
        }
        Ok(decision)
    }
}
