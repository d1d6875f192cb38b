use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SignalType {
    Buy,
    Sell,
}

/// A buy/sell marker annotated onto the chart.
/// Its time does not have to match a candle; it is placed by its own time/price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub kind: SignalType,
    pub time: i64,
    pub price: f64,
    pub volume: f64,
}

/// Where a marker goes and which way it points
pub trait SignalPoint {
    fn time(&self) -> i64;
    fn price(&self) -> f64;
    fn kind(&self) -> SignalType;
}

impl SignalPoint for Signal {
    fn time(&self) -> i64 {
        self.time
    }
    fn price(&self) -> f64 {
        self.price
    }
    fn kind(&self) -> SignalType {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_is_serialized_under_its_wire_name() {
        let signal = Signal {
            kind: SignalType::Sell,
            time: 5,
            price: 1.5,
            volume: 2.0,
        };
        let json = serde_json::to_value(signal).unwrap();
        assert_eq!(json["type"], "sell");
        assert_eq!(SignalType::Buy.to_string(), "buy");
    }
}
