use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tower_http::cors::CorsLayer;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

use crate::config::RELAY;
use crate::relay::error::RelayError;
use crate::relay::markets::markets_handler;
use crate::relay::protocol::{CandlesRequest, ClientEvent, ServerEvent};
use crate::relay::upstream::{UpstreamRequest, process_upstream_text};
use crate::utils::TimeUtils;

type UpstreamStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type UpstreamSink = SplitSink<UpstreamStream, UpstreamMessage>;
type UpstreamSource = SplitStream<UpstreamStream>;

/// Shared, read-only relay settings
pub struct RelayState {
    pub upstream_ws_url: String,
    pub markets_url: String,
    pub candles_method: String,
    pub max_signals: usize,
    pub channel_capacity: usize,
    pub http: reqwest::Client,
}

impl RelayState {
    pub fn new(upstream_ws_url: String, markets_url: String) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(RELAY.upstream.markets_timeout_ms))
            .build()?;
        Ok(RelayState {
            upstream_ws_url,
            markets_url,
            candles_method: RELAY.upstream.candles_method.to_string(),
            max_signals: RELAY.max_signals,
            channel_capacity: RELAY.client_channel_capacity,
            http,
        })
    }
}

pub fn router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route(RELAY.ws_path, get(ws_handler))
        .route(RELAY.markets_path, get(markets_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RelayState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One client, one exchange socket. Lives until the client goes away.
async fn handle_socket(socket: WebSocket, state: Arc<RelayState>) {
    let (mut client_tx, mut client_rx) = socket.split();
    let (events_tx, mut events_rx) = mpsc::channel::<ServerEvent>(state.channel_capacity);

    // Everything bound for the client funnels through one task
    let forward_task = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_relay_traffic {
                log::info!("[relay] -> client: {}", event.name());
            }
            match serde_json::to_string(&event) {
                Ok(text) => {
                    if client_tx.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => log::error!("Failed to encode {}: {}", event.name(), e),
            }
        }
    });

    let (mut upstream_tx, reader_task) = match connect_upstream(&state, events_tx.clone()).await {
        Ok((sink, reader)) => (Some(sink), Some(reader)),
        Err(e) => {
            log::error!("Exchange connection failed: {}", e);
            let _ = events_tx.send(ServerEvent::ErrorConnectExchange).await;
            let _ = events_tx.send(ServerEvent::DisconnectExchange).await;
            (None, None)
        }
    };

    let mut next_id: u64 = 1;
    while let Some(msg) = client_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(ClientEvent::CandlesRequest(request)) => {
                    let Some(sink) = upstream_tx.as_mut() else {
                        log::warn!("Dropping request for {}: exchange not connected", request.market);
                        continue;
                    };
                    let id = next_id;
                    next_id += 1;
                    if let Err(e) = send_candles_request(sink, id, &request, &state).await {
                        log::error!("Failed to forward request {}: {}", id, e);
                    }
                }
                Err(e) => log::warn!("Ignoring client frame: {}", e),
            },
            Ok(Message::Close(_)) => break,
            Err(e) => {
                log::warn!("Client socket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    if let Some(mut sink) = upstream_tx {
        let _ = sink.close().await;
    }
    if let Some(task) = reader_task {
        task.abort();
    }
    forward_task.abort();
}

async fn connect_upstream(
    state: &RelayState,
    events: mpsc::Sender<ServerEvent>,
) -> Result<(UpstreamSink, JoinHandle<()>), RelayError> {
    let (stream, _) = connect_async(state.upstream_ws_url.as_str())
        .await
        .map_err(|e| RelayError::UpstreamConnect(e.to_string()))?;
    let (sink, source) = stream.split();

    log::info!("Connected to exchange at {}", state.upstream_ws_url);
    let _ = events.send(ServerEvent::ConnectExchange(true)).await;

    let reader = tokio::spawn(read_upstream(source, events, state.max_signals));
    Ok((sink, reader))
}

async fn send_candles_request(
    sink: &mut UpstreamSink,
    id: u64,
    request: &CandlesRequest,
    state: &RelayState,
) -> Result<(), RelayError> {
    let payload = serde_json::to_string(&UpstreamRequest::candles(id, &state.candles_method, request))?;
    log::info!(
        "Request {}: {} candles for {}",
        id,
        TimeUtils::interval_to_string(request.interval),
        request.market
    );

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_relay_traffic {
        log::info!("[relay] -> exchange: {}", payload);
    }

    sink.send(UpstreamMessage::Text(payload.into())).await?;
    Ok(())
}

/// Every exchange reply becomes one `candles-data`; responses go out in arrival order
async fn read_upstream(mut source: UpstreamSource, events: mpsc::Sender<ServerEvent>, max_signals: usize) {
    let mut rng = StdRng::from_entropy();

    while let Some(msg) = source.next().await {
        match msg {
            Ok(UpstreamMessage::Text(text)) => {
                match process_upstream_text(text.as_str(), max_signals, &mut rng) {
                    Ok(data) => {
                        #[cfg(debug_assertions)]
                        if DEBUG_FLAGS.print_relay_traffic {
                            log::info!(
                                "[relay] <- exchange: {} candles, error {:?}",
                                data.result.len(),
                                data.error
                            );
                        }
                        if events.send(ServerEvent::CandlesData(data)).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => log::warn!("Unexpected exchange payload: {}", e),
                }
            }
            Ok(UpstreamMessage::Close(_)) => break,
            Err(e) => {
                log::error!("Exchange socket error: {}", e);
                let _ = events.send(ServerEvent::ErrorConnectExchange).await;
                break;
            }
            _ => {}
        }
    }

    log::info!("Exchange connection closed");
    let _ = events.send(ServerEvent::DisconnectExchange).await;
}
