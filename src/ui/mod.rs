// User interface components
pub mod app;
pub mod chart_view;
pub mod config;
pub mod notifications;
pub mod panels;
pub mod styles;

// Re-export main app
pub use app::{AppSettings, CandleViewApp, MarketList, build_chart_instance, candles_request};
pub use config::{UI_CONFIG, UI_TEXT};
