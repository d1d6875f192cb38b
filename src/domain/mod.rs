// Domain types and value objects
pub mod candle;
pub mod market;
pub mod signal;
pub mod timeframe;

// Re-export commonly used types
pub use candle::{Candle, CandleRecord, CandleType, Ohlcv};
pub use market::MarketInfo;
pub use signal::{Signal, SignalPoint, SignalType};
pub use timeframe::Timeframe;
