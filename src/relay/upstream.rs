//! Exchange-side wire format.
//!
//! Candles come back as positional tuples `[time, open, close, highest, lowest, ?, volume, ...]`.
//! Index 5 has no documented meaning and is dropped.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::CandleRecord;
use crate::relay::error::RelayError;
use crate::relay::protocol::{CandlesData, CandlesRequest, UpstreamError};
use crate::relay::signals::generate_random_signals;

const TIME: usize = 0;
const OPEN: usize = 1;
const CLOSE: usize = 2;
const HIGHEST: usize = 3;
const LOWEST: usize = 4;
const VOLUME: usize = 6;

/// `{"id": .., "method": "candles_request", "params": [market, start, end, interval]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamRequest {
    pub id: u64,
    pub method: String,
    pub params: (String, i64, i64, i64),
}

impl UpstreamRequest {
    pub fn candles(id: u64, method: &str, request: &CandlesRequest) -> Self {
        UpstreamRequest {
            id,
            method: method.to_string(),
            params: (
                request.market.clone(),
                request.start_time,
                request.end_time,
                request.interval,
            ),
        }
    }
}

/// One exchange reply. `result` is left untyped: non-candle replies carry other shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamFrame {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<UpstreamError>,
}

// Exchange sends decimals as strings; numbers are tolerated and stringified
fn text_field(row: &[Value], index: usize) -> Result<String, RelayError> {
    match row.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        other => Err(RelayError::MalformedRow(format!(
            "field {} is {:?}",
            index, other
        ))),
    }
}

fn time_field(row: &[Value]) -> Result<i64, RelayError> {
    let value = row.get(TIME);
    value
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .ok_or_else(|| RelayError::MalformedRow(format!("time is {:?}", value)))
}

/// Positional tuple -> named record, strings untouched
pub fn reshape_row(row: &[Value]) -> Result<CandleRecord, RelayError> {
    if row.len() <= VOLUME {
        return Err(RelayError::MalformedRow(format!(
            "expected at least {} fields, got {}",
            VOLUME + 1,
            row.len()
        )));
    }
    Ok(CandleRecord {
        time: time_field(row)?,
        open: text_field(row, OPEN)?,
        close: text_field(row, CLOSE)?,
        highest: text_field(row, HIGHEST)?,
        lowest: text_field(row, LOWEST)?,
        volume: text_field(row, VOLUME)?,
    })
}

/// Every well-formed row of a `result` value; anything that is not an array yields nothing
pub fn reshape_result(result: Option<&Value>) -> Vec<CandleRecord> {
    let Some(Value::Array(rows)) = result else {
        return Vec::new();
    };
    rows.iter()
        .filter_map(|row| {
            let reshaped = match row {
                Value::Array(fields) => reshape_row(fields),
                other => Err(RelayError::MalformedRow(format!("row is {}", other))),
            };
            match reshaped {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Dropping upstream row: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// Exchange text frame -> `candles-data` payload, signals attached
pub fn process_upstream_text<R: Rng>(
    text: &str,
    max_signals: usize,
    rng: &mut R,
) -> Result<CandlesData, RelayError> {
    let frame: UpstreamFrame = serde_json::from_str(text)?;
    let result = reshape_result(frame.result.as_ref());
    let signals = generate_random_signals(&result, max_signals, rng);
    Ok(CandlesData {
        result,
        signals,
        error: frame.error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    #[test]
    fn reshapes_positional_tuple() {
        let row = json!([1700000000, "10", "12", "13", "9", "?", "500"]);
        let record = reshape_row(row.as_array().unwrap()).unwrap();
        assert_eq!(
            record,
            CandleRecord {
                time: 1_700_000_000,
                open: "10".into(),
                close: "12".into(),
                highest: "13".into(),
                lowest: "9".into(),
                volume: "500".into(),
            }
        );
    }

    #[test]
    fn short_rows_are_rejected() {
        let row = json!([1700000000, "10", "12"]);
        assert!(matches!(
            reshape_row(row.as_array().unwrap()),
            Err(RelayError::MalformedRow(_))
        ));
    }

    #[test]
    fn request_serializes_params_positionally() {
        let request = CandlesRequest {
            market: "ETH_USDT".into(),
            start_time: 1,
            end_time: 2,
            interval: 86_400,
        };
        let value = serde_json::to_value(UpstreamRequest::candles(2, "candles_request", &request)).unwrap();
        assert_eq!(
            value,
            json!({"id": 2, "method": "candles_request", "params": ["ETH_USDT", 1, 2, 86400]})
        );
    }

    #[test]
    fn empty_result_gives_empty_payload() {
        let mut rng = StdRng::seed_from_u64(0);
        let data = process_upstream_text(r#"{"id":2,"result":[],"error":null}"#, 10, &mut rng).unwrap();
        assert!(data.result.is_empty());
        assert!(data.signals.is_empty());
        assert!(data.error.is_none());
    }

    #[test]
    fn error_is_passed_through() {
        let mut rng = StdRng::seed_from_u64(0);
        let text = r#"{"id":2,"result":null,"error":{"code":1,"message":"invalid argument"}}"#;
        let data = process_upstream_text(text, 10, &mut rng).unwrap();
        assert!(data.result.is_empty());
        assert_eq!(
            data.error,
            Some(UpstreamError {
                code: 1,
                message: "invalid argument".into()
            })
        );
    }

    #[test]
    fn rows_get_signals_and_bad_rows_are_dropped() {
        let mut rng = StdRng::seed_from_u64(9);
        let text = json!({
            "id": 2,
            "result": [
                [1700000000, "10", "12", "13", "9", "1", "500", "x"],
                [1700086400, "12", "11", "14", "10", "1", "300"],
                ["bad"],
            ],
            "error": null
        })
        .to_string();
        let data = process_upstream_text(&text, 10, &mut rng).unwrap();
        assert_eq!(data.result.len(), 2);
        assert_eq!(data.signals.len(), 2);
    }

    #[test]
    fn non_json_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            process_upstream_text("pong", 10, &mut rng),
            Err(RelayError::MalformedFrame(_))
        ));
    }
}
