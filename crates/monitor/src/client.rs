//! JSON-RPC client for the watched node.

use crate::{BlockRecord, MonitorError, MonitorResult};
use serde::Deserialize;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use url::Url;

/// A minimal JSON-RPC 2.0 client for the single call the watchdog makes.
///
/// Issues `eth_getBlockByNumber ["latest", false]` and decodes only the
/// `number` field of the result. Exactly one request per invocation, no retry.
#[derive(Debug)]
pub struct RpcClient {
    /// The underlying HTTP client, carrying the request deadline.
    http: reqwest::Client,
    /// The node's JSON-RPC endpoint.
    endpoint: Url,
    /// Request id source. The id only pairs a response with its request within
    /// a single call, so a client-local counter is unique enough.
    next_id: AtomicU64,
}

/// JSON-RPC 2.0 response envelope, reduced to the fields the watchdog reads.
#[derive(Debug, Deserialize)]
struct Envelope {
    /// The error object, when the node rejected the call.
    #[serde(default)]
    error: Option<ErrorObject>,
    /// The raw result payload, decoded further on success.
    #[serde(default)]
    result: Option<serde_json::Value>,
}

/// The error object of a JSON-RPC response.
#[derive(Debug, Deserialize)]
struct ErrorObject {
    /// Human-readable error message from the node.
    #[serde(default)]
    message: String,
}

/// The slice of the `eth_getBlockByNumber` result the watchdog cares about.
#[derive(Debug, Deserialize)]
struct LatestBlock {
    /// Hex-encoded block number.
    number: String,
}

impl RpcClient {
    /// Creates a client for `endpoint` with `timeout` as the per-request
    /// deadline.
    pub fn new(endpoint: Url, timeout: Duration) -> MonitorResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint, next_id: AtomicU64::new(1) })
    }

    /// Fetches the node's latest block.
    ///
    /// The returned record carries the fetch-completion time as its
    /// observation timestamp.
    pub async fn latest_block(&self) -> MonitorResult<BlockRecord> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": "eth_getBlockByNumber",
            "params": ["latest", false],
        });

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await?;
        let raw = response.bytes().await?;

        let number = decode_latest(&raw)?;
        Ok(BlockRecord::observed_now(number))
    }
}

/// Decodes a JSON-RPC response body down to the reported block number.
///
/// A non-empty `error.message` wins over any result; an absent or malformed
/// result is a decode failure.
fn decode_latest(raw: &[u8]) -> MonitorResult<String> {
    let envelope: Envelope = serde_json::from_slice(raw)?;
    if let Some(error) = envelope.error {
        if !error.message.is_empty() {
            return Err(MonitorError::Rpc(error.message));
        }
    }
    let result = envelope.result.unwrap_or(serde_json::Value::Null);
    let block: LatestBlock = serde_json::from_value(result)?;
    Ok(block.number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_result_number() {
        let raw = br#"{"jsonrpc":"2.0","id":1,"result":{"number":"0x152dd04"}}"#;
        assert_eq!(decode_latest(raw).unwrap(), "0x152dd04");
    }

    #[test]
    fn test_decode_ignores_other_result_fields() {
        let raw = br#"{"jsonrpc":"2.0","id":7,"result":{"hash":"0xabc","number":"0x2","timestamp":"0x68","transactions":[]}}"#;
        assert_eq!(decode_latest(raw).unwrap(), "0x2");
    }

    #[test]
    fn test_decode_error_envelope() {
        let raw = br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#;
        let err = decode_latest(raw).unwrap_err();
        assert!(matches!(err, MonitorError::Rpc(message) if message == "method not found"));
    }

    #[test]
    fn test_decode_empty_error_message_falls_through_to_result() {
        let raw = br#"{"jsonrpc":"2.0","id":1,"error":{"message":""},"result":{"number":"0x9"}}"#;
        assert_eq!(decode_latest(raw).unwrap(), "0x9");
    }

    #[test]
    fn test_decode_missing_result() {
        let raw = br#"{"jsonrpc":"2.0","id":1}"#;
        assert!(matches!(decode_latest(raw).unwrap_err(), MonitorError::Decode(_)));
    }

    #[test]
    fn test_decode_result_without_number() {
        let raw = br#"{"jsonrpc":"2.0","id":1,"result":{"hash":"0xabc"}}"#;
        assert!(matches!(decode_latest(raw).unwrap_err(), MonitorError::Decode(_)));
    }

    #[test]
    fn test_decode_malformed_envelope() {
        let raw = br#"{"jsonrpc": "#;
        assert!(matches!(decode_latest(raw).unwrap_err(), MonitorError::Decode(_)));
    }

    #[test]
    fn test_request_ids_are_unique_per_client() {
        let client = RpcClient::new(
            Url::parse("http://localhost:8545").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        let first = client.next_id.fetch_add(1, Ordering::Relaxed);
        let second = client.next_id.fetch_add(1, Ordering::Relaxed);
        assert_ne!(first, second);
    }
}
