//! The tracked block record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A block identifier paired with the time it was first observed.
///
/// The number is kept exactly as the node reports it (hex-encoded height) and
/// is only ever compared for equality, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// The hex-encoded block number, e.g. `"0x152dd04"`.
    pub number: String,
    /// When `number` was first recorded as the baseline (UTC). On a freshly
    /// fetched record this is the fetch-completion time, not block time.
    pub observed_at: DateTime<Utc>,
}

impl BlockRecord {
    /// Creates a record with an explicit observation time.
    pub const fn new(number: String, observed_at: DateTime<Utc>) -> Self {
        Self { number, observed_at }
    }

    /// Creates a record observed now.
    pub fn observed_now(number: String) -> Self {
        Self::new(number, Utc::now())
    }
}
