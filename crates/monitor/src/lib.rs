//! Core stall-check logic for `blockwatch`.
//!
//! A single-shot check against an Ethereum-compatible node: load the locally
//! persisted baseline, fetch the node's latest block over JSON-RPC, decide
//! whether the chain has advanced, and persist a new baseline only when it has.

mod block;
pub use block::BlockRecord;

mod client;
pub use client::RpcClient;

mod store;
pub use store::StateStore;

mod check;
pub use check::{Decision, StallCheck};

mod errors;
pub use errors::{MonitorError, MonitorResult};
