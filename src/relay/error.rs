use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum RelayError {
    /// Could not open the exchange socket
    UpstreamConnect(String),
    /// Exchange socket refused a frame
    UpstreamSend(String),
    /// Exchange frame was not the expected JSON
    MalformedFrame(String),
    /// Candle tuple too short or with the wrong field types
    MalformedRow(String),
    /// Market list request failed
    MarketsFetch(String),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpstreamConnect(msg) => write!(f, "upstream_connect: {msg}"),
            Self::UpstreamSend(msg) => write!(f, "upstream_send: {msg}"),
            Self::MalformedFrame(msg) => write!(f, "malformed_frame: {msg}"),
            Self::MalformedRow(msg) => write!(f, "malformed_row: {msg}"),
            Self::MarketsFetch(msg) => write!(f, "markets_fetch: {msg}"),
        }
    }
}

impl std::error::Error for RelayError {}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MarketsFetch(_) | Self::UpstreamConnect(_) | Self::UpstreamSend(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::MalformedFrame(_) | Self::MalformedRow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedFrame(e.to_string())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        Self::MarketsFetch(e.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for RelayError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::UpstreamSend(e.to_string())
    }
}
