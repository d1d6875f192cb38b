use std::fmt;

use serde::{Deserialize, Serialize};

// Define the CandleType enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleType {
    Up,
    Down,
}

/// Read access to one OHLCV record.
/// The chart only ever sees data through this trait, so any row type can be plotted.
pub trait Ohlcv {
    fn time(&self) -> i64;
    fn open(&self) -> f64;
    fn close(&self) -> f64;
    fn highest(&self) -> f64;
    fn lowest(&self) -> f64;
    fn volume(&self) -> f64;

    /// `close == open` counts as Down
    fn candle_type(&self) -> CandleType {
        if self.close() > self.open() {
            CandleType::Up
        } else {
            CandleType::Down
        }
    }
}

/// One candlestick interval, numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix seconds, start of the bucket
    pub time: i64,
    pub open: f64,
    pub close: f64,
    pub highest: f64,
    pub lowest: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, close: f64, highest: f64, lowest: f64, volume: f64) -> Self {
        Candle {
            time,
            open,
            close,
            highest,
            lowest,
            volume,
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        (self.open.min(self.close), self.open.max(self.close))
    }

    /// `highest >= max(open, close)`, `lowest <= min(open, close)`, `volume >= 0`
    pub fn is_well_formed(&self) -> bool {
        let (body_low, body_high) = self.body_range();
        self.highest >= body_high && self.lowest <= body_low && self.volume >= 0.0
    }
}

impl Ohlcv for Candle {
    fn time(&self) -> i64 {
        self.time
    }
    fn open(&self) -> f64 {
        self.open
    }
    fn close(&self) -> f64 {
        self.close
    }
    fn highest(&self) -> f64 {
        self.highest
    }
    fn lowest(&self) -> f64 {
        self.lowest
    }
    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Candle as it travels from relay to viewer.
/// Prices and volume stay the exchange's decimal strings, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleRecord {
    pub time: i64,
    pub open: String,
    pub close: String,
    pub highest: String,
    pub lowest: String,
    pub volume: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CandleError {
    /// Field name plus the text that failed to parse
    InvalidNumber(&'static str, String),
}

impl fmt::Display for CandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandleError::InvalidNumber(field, text) => {
                write!(f, "Invalid number in candle field '{}': {:?}", field, text)
            }
        }
    }
}

impl std::error::Error for CandleError {}

fn parse_field(field: &'static str, text: &str) -> Result<f64, CandleError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CandleError::InvalidNumber(field, text.to_string()))
}

impl TryFrom<&CandleRecord> for Candle {
    type Error = CandleError;

    fn try_from(record: &CandleRecord) -> Result<Self, Self::Error> {
        Ok(Candle {
            time: record.time,
            open: parse_field("open", &record.open)?,
            close: parse_field("close", &record.close)?,
            highest: parse_field("highest", &record.highest)?,
            lowest: parse_field("lowest", &record.lowest)?,
            volume: parse_field("volume", &record.volume)?,
        })
    }
}

/// Parse every record, dropping (and logging) the ones that do not hold numbers.
/// Inconsistent but numeric candles are kept and only logged.
pub fn parse_records(records: &[CandleRecord]) -> Vec<Candle> {
    records
        .iter()
        .filter_map(|record| match Candle::try_from(record) {
            Ok(candle) => {
                if !candle.is_well_formed() {
                    log::warn!("Candle @ {} has a body outside its wicks or negative volume", record.time);
                }
                Some(candle)
            }
            Err(e) => {
                log::warn!("Skipping candle @ {}: {}", record.time, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(open: &str, close: &str) -> CandleRecord {
        CandleRecord {
            time: 1_700_000_000,
            open: open.to_string(),
            close: close.to_string(),
            highest: "13".to_string(),
            lowest: "9".to_string(),
            volume: "500".to_string(),
        }
    }

    #[test]
    fn close_above_open_is_up() {
        let candle = Candle::new(0, 10.0, 12.0, 13.0, 9.0, 1.0);
        assert_eq!(candle.candle_type(), CandleType::Up);
        assert_eq!(candle.body_range(), (10.0, 12.0));
    }

    #[test]
    fn close_equal_to_open_is_down() {
        let candle = Candle::new(0, 10.0, 10.0, 13.0, 9.0, 1.0);
        assert_eq!(candle.candle_type(), CandleType::Down);
    }

    #[test]
    fn close_below_open_is_down() {
        let candle = Candle::new(0, 12.0, 10.0, 13.0, 9.0, 1.0);
        assert_eq!(candle.candle_type(), CandleType::Down);
        assert_eq!(candle.body_range(), (10.0, 12.0));
    }

    #[test]
    fn invariants() {
        assert!(Candle::new(0, 10.0, 12.0, 13.0, 9.0, 0.0).is_well_formed());
        assert!(!Candle::new(0, 10.0, 14.0, 13.0, 9.0, 0.0).is_well_formed());
        assert!(!Candle::new(0, 10.0, 12.0, 13.0, 9.0, -1.0).is_well_formed());
    }

    #[test]
    fn record_parses_into_numbers() {
        let candle = Candle::try_from(&record("10", "12")).unwrap();
        assert_eq!(candle, Candle::new(1_700_000_000, 10.0, 12.0, 13.0, 9.0, 500.0));
    }

    #[test]
    fn bad_record_is_rejected_and_skipped() {
        let bad = record("ten", "12");
        assert_eq!(
            Candle::try_from(&bad),
            Err(CandleError::InvalidNumber("open", "ten".to_string()))
        );
        let parsed = parse_records(&[bad, record("10", "12")]);
        assert_eq!(parsed.len(), 1);
    }
}
