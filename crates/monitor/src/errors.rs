//! Error types for the monitor.

use thiserror::Error;

/// Errors that can occur during a stall check.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The request to the node failed to connect, timed out, or the response
    /// body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error envelope.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// Malformed JSON, either in the response envelope, the result payload, or
    /// the local state file.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The local state file could not be read or written.
    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for monitor results.
pub type MonitorResult<T> = Result<T, MonitorError>;
