//! Relay server and upstream exchange configuration

/// WhiteBit endpoints the relay talks to
pub struct UpstreamConfig {
    /// Public WebSocket API
    pub ws_url: &'static str,
    /// Public REST market list, proxied verbatim by `GET /markets`
    pub markets_url: &'static str,
    /// WebSocket method used for historical candles
    pub candles_method: &'static str,
    /// Timeout for the markets proxy call (ms)
    pub markets_timeout_ms: u64,
}

/// The Master Relay Configuration
pub struct RelayConfig {
    pub bind_addr: &'static str,
    pub ws_path: &'static str,
    pub markets_path: &'static str,
    /// Buffered outbound events per client connection
    pub client_channel_capacity: usize,
    /// Upper bound on generated signals per response
    pub max_signals: usize,
    pub upstream: UpstreamConfig,
}

pub const RELAY: RelayConfig = RelayConfig {
    bind_addr: "127.0.0.1:8001",
    ws_path: "/ws",
    markets_path: "/markets",
    client_channel_capacity: 64,
    max_signals: 10,
    upstream: UpstreamConfig {
        ws_url: "wss://api.whitebit.com/ws",
        markets_url: "https://whitebit.com/api/v4/public/markets",
        candles_method: "candles_request",
        markets_timeout_ms: 10_000,
    },
};
