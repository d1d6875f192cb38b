//! Viewer (desktop client) configuration

pub struct ClientConfig {
    /// Relay WebSocket endpoint
    pub relay_ws_url: &'static str,
    /// Relay market list endpoint
    pub markets_url: &'static str,
    /// How long a toast stays on screen (seconds)
    pub toast_duration_sec: u64,
    /// Repaint cadence while waiting on the relay (ms)
    pub poll_interval_ms: u64,
    /// Timeout for the market list request (ms)
    pub markets_timeout_ms: u64,
}

pub const CLIENT: ClientConfig = ClientConfig {
    relay_ws_url: "ws://127.0.0.1:8001/ws",
    markets_url: "http://127.0.0.1:8001/markets",
    toast_duration_sec: 5,
    poll_interval_ms: 100,
    markets_timeout_ms: 10_000,
};

