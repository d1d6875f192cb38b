use serde::{Deserialize, Serialize};

/// One entry of the exchange's market list. Unknown fields are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct MarketInfo {
    /// Exchange symbol, e.g. `BTC_USDT`
    pub name: String,
    pub stock: String,
    pub money: String,
}

impl MarketInfo {
    /// `stock/money`, as shown in the selector
    pub fn label(&self) -> String {
        format!("{}/{}", self.stock, self.money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exchange_entry_and_ignores_extras() {
        let json = r#"[{"name":"BTC_USDT","stock":"BTC","money":"USDT","stockPrec":"6","tradesEnabled":true}]"#;
        let markets: Vec<MarketInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].name, "BTC_USDT");
        assert_eq!(markets[0].label(), "BTC/USDT");
    }
}
