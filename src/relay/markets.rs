use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::relay::error::RelayError;
use crate::relay::server::RelayState;

/// Exchange market list, raw body
pub async fn fetch_markets(client: &reqwest::Client, url: &str) -> Result<Bytes, RelayError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    Ok(body)
}

/// `GET /markets`, upstream body passed through untouched
pub async fn markets_handler(
    State(state): State<Arc<RelayState>>,
) -> Result<impl IntoResponse, RelayError> {
    match fetch_markets(&state.http, &state.markets_url).await {
        Ok(body) => {
            log::info!("Proxied market list ({} bytes)", body.len());
            Ok(([(header::CONTENT_TYPE, "application/json")], body))
        }
        Err(e) => {
            log::error!("Market list fetch failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use serde_json::Value;
    use tokio::net::TcpListener;

    use crate::config::RELAY;
    use crate::relay::server::router;

    const UPSTREAM_BODY: &str =
        r#"[ {"name":"BTC_USDT","stock":"BTC","money":"USDT","stockPrec":"6"} , {"name":"ETH_USDT","stock":"ETH","money":"USDT"}]"#;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_relay(markets_url: String) -> String {
        let state = RelayState::new("ws://127.0.0.1:9".to_string(), markets_url).unwrap();
        let base = serve(router(Arc::new(state))).await;
        format!("{}{}", base, RELAY.markets_path)
    }

    #[tokio::test]
    async fn market_list_is_returned_verbatim() {
        let exchange = serve(Router::new().route("/markets", get(|| async { UPSTREAM_BODY }))).await;
        let relay = spawn_relay(format!("{}/markets", exchange)).await;

        let response = reqwest::get(&relay).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "application/json"
        );
        assert_eq!(response.text().await.unwrap(), UPSTREAM_BODY);
    }

    #[tokio::test]
    async fn dead_upstream_is_a_bad_gateway() {
        // Free port with nothing behind it
        let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead_addr = closed.local_addr().unwrap();
        drop(closed);

        let relay = spawn_relay(format!("http://{}/markets", dead_addr)).await;
        let response = reqwest::get(&relay).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body: Value = response.json().await.unwrap();
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("markets_fetch:"), "{}", error);
    }

    #[tokio::test]
    async fn upstream_error_status_is_a_bad_gateway() {
        let exchange = serve(Router::new().route(
            "/markets",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        ))
        .await;
        let relay = spawn_relay(format!("{}/markets", exchange)).await;

        let response = reqwest::get(&relay).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
