//! Events exchanged between the relay and its clients.
//!
//! Every WebSocket text frame is one JSON object `{"event": <name>, "data": <payload>}`;
//! events without a payload carry no `data` key.

use serde::{Deserialize, Serialize};

use crate::domain::{CandleRecord, Signal};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlesRequest {
    pub market: String,
    /// Unix seconds
    pub start_time: i64,
    /// Unix seconds
    pub end_time: i64,
    /// Bucket width in seconds
    pub interval: i64,
}

/// Client -> relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    CandlesRequest(CandlesRequest),
}

/// Exchange-side error, passed through untouched (e.g. `{code: 1, message: "invalid argument"}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlesData {
    pub result: Vec<CandleRecord>,
    #[serde(default)]
    pub signals: Vec<Signal>,
    pub error: Option<UpstreamError>,
}

/// Relay -> client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    CandlesData(CandlesData),
    /// Upstream socket is open; payload is always `true`
    ConnectExchange(bool),
    ErrorConnectExchange,
    DisconnectExchange,
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::CandlesData(_) => "candles-data",
            ServerEvent::ConnectExchange(_) => "connect-exchange",
            ServerEvent::ErrorConnectExchange => "error-connect-exchange",
            ServerEvent::DisconnectExchange => "disconnect-exchange",
        }
    }
}
