use std::sync::mpsc as std_mpsc;
use std::sync::{Arc, Mutex};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use eframe::egui;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::relay::protocol::{CandlesRequest, ClientEvent, ServerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
}

/// What the UI thread drains each frame
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    Server(ServerEvent),
    /// Relay socket is gone; carries the error when it did not close cleanly
    Closed(Option<String>),
}

/// Viewer side of the relay WebSocket.
/// Runs its own tokio runtime on a background thread; the UI talks to it through channels.
/// No reconnect: once closed, a new connection has to be made.
pub struct RelayConnection {
    outbound: mpsc::UnboundedSender<ClientEvent>,
    inbound: std_mpsc::Receiver<RelayEvent>,
    status: Arc<Mutex<ConnectionStatus>>,
}

impl RelayConnection {
    /// `repaint` is poked whenever an event arrives so the UI wakes up
    pub fn connect(url: String, repaint: Option<egui::Context>) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel::<ClientEvent>();
        let (inbound_tx, inbound_rx) = std_mpsc::channel::<RelayEvent>();
        let status = Arc::new(Mutex::new(ConnectionStatus::Connecting));
        let status_arc = status.clone();

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create relay runtime: {}", e);
                    set_status(&status_arc, ConnectionStatus::Disconnected);
                    let _ = inbound_tx.send(RelayEvent::Closed(Some(e.to_string())));
                    return;
                }
            };

            rt.block_on(async move {
                let outcome = run_relay_session(
                    &url,
                    outbound_rx,
                    &inbound_tx,
                    &status_arc,
                    repaint.as_ref(),
                )
                .await;

                set_status(&status_arc, ConnectionStatus::Disconnected);
                let reason = match outcome {
                    Ok(()) => None,
                    Err(e) => {
                        log::error!("Relay connection error: {}", e);
                        Some(e.to_string())
                    }
                };
                let _ = inbound_tx.send(RelayEvent::Closed(reason));
                if let Some(ctx) = &repaint {
                    ctx.request_repaint();
                }
            });
        });

        RelayConnection {
            outbound: outbound_tx,
            inbound: inbound_rx,
            status,
        }
    }

    pub fn request_candles(&self, request: CandlesRequest) -> anyhow::Result<()> {
        self.outbound
            .send(ClientEvent::CandlesRequest(request))
            .map_err(|_| anyhow::anyhow!("Relay connection is closed"))
    }

    /// Everything received since the last call, oldest first
    pub fn drain(&self) -> Vec<RelayEvent> {
        self.inbound.try_iter().collect()
    }

    pub fn status(&self) -> ConnectionStatus {
        match self.status.lock() {
            Ok(status) => *status,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

fn set_status(status: &Arc<Mutex<ConnectionStatus>>, value: ConnectionStatus) {
    match status.lock() {
        Ok(mut guard) => *guard = value,
        Err(poisoned) => *poisoned.into_inner() = value,
    }
}

async fn run_relay_session(
    url: &str,
    mut outbound: mpsc::UnboundedReceiver<ClientEvent>,
    inbound: &std_mpsc::Sender<RelayEvent>,
    status: &Arc<Mutex<ConnectionStatus>>,
    repaint: Option<&egui::Context>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    log::info!("Connecting to relay at {}", url);
    let (ws_stream, _) = connect_async(url).await?;
    set_status(status, ConnectionStatus::Connected);
    log::info!("✓ Connected to relay");

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            Some(event) = outbound.recv() => {
                let text = serde_json::to_string(&event)?;
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_relay_traffic {
                    log::info!("[relay-client] -> {}", text);
                }
                write.send(Message::Text(text.into())).await?;
            }
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => {
                            #[cfg(debug_assertions)]
                            if DEBUG_FLAGS.print_relay_traffic {
                                log::info!("[relay-client] <- {}", event.name());
                            }
                            if inbound.send(RelayEvent::Server(event)).is_err() {
                                // UI is gone
                                break;
                            }
                            if let Some(ctx) = repaint {
                                ctx.request_repaint();
                            }
                        }
                        Err(e) => log::warn!("⚠️ Unexpected relay payload: {}", e),
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => return Err(e.into()),
                Some(Ok(_)) => {}
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::protocol::CandlesData;
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;

    fn wait_for(conn: &RelayConnection, count: usize) -> Vec<RelayEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.len() < count && Instant::now() < deadline {
            events.extend(conn.drain());
            std::thread::sleep(Duration::from_millis(10));
        }
        events
    }

    #[test]
    fn forwards_requests_and_collects_events() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let listener = rt.block_on(TcpListener::bind("127.0.0.1:0")).unwrap();
        let addr = listener.local_addr().unwrap();

        // Fake relay: announce the exchange, answer one request, then close
        rt.spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let hello = serde_json::to_string(&ServerEvent::ConnectExchange(true)).unwrap();
            ws.send(Message::Text(hello.into())).await.unwrap();

            while let Some(Ok(msg)) = ws.next().await {
                if let Message::Text(text) = msg {
                    let event: ClientEvent = serde_json::from_str(text.as_str()).unwrap();
                    let ClientEvent::CandlesRequest(request) = event;
                    assert_eq!(request.market, "BTC_USDT");
                    let reply = ServerEvent::CandlesData(CandlesData {
                        result: vec![],
                        signals: vec![],
                        error: None,
                    });
                    let reply = serde_json::to_string(&reply).unwrap();
                    ws.send(Message::Text(reply.into())).await.unwrap();
                    ws.close(None).await.unwrap();
                    break;
                }
            }
        });

        let conn = RelayConnection::connect(format!("ws://{}", addr), None);
        let first = wait_for(&conn, 1);
        assert_eq!(first, vec![RelayEvent::Server(ServerEvent::ConnectExchange(true))]);
        assert_eq!(conn.status(), ConnectionStatus::Connected);

        conn.request_candles(CandlesRequest {
            market: "BTC_USDT".into(),
            start_time: 1,
            end_time: 2,
            interval: 86_400,
        })
        .unwrap();

        let rest = wait_for(&conn, 2);
        assert!(matches!(rest[0], RelayEvent::Server(ServerEvent::CandlesData(_))));
        assert_eq!(rest[1], RelayEvent::Closed(None));
        assert_eq!(conn.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn unreachable_relay_reports_closed_with_reason() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let closed = rt.block_on(TcpListener::bind("127.0.0.1:0")).unwrap();
        let addr = closed.local_addr().unwrap();
        drop(closed);

        let conn = RelayConnection::connect(format!("ws://{}", addr), None);
        let events = wait_for(&conn, 1);
        assert!(matches!(events.as_slice(), [RelayEvent::Closed(Some(_))]));
        assert!(conn.request_candles(CandlesRequest {
            market: "X".into(),
            start_time: 0,
            end_time: 0,
            interval: 60,
        })
        .is_err());
    }
}
