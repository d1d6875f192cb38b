#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod relay;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use chart::{CandlestickChart, ChartHandle, ChartInstance};
pub use domain::{Candle, CandleRecord, MarketInfo, Signal, Timeframe};
pub use ui::{AppSettings, CandleViewApp};

// CLI argument parsing
use clap::Parser;

use crate::config::{CHART, CLIENT, ChartConfig};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Relay WebSocket endpoint
    #[arg(long, default_value = CLIENT.relay_ws_url)]
    pub relay_url: String,

    /// Relay market list endpoint
    #[arg(long, default_value = CLIENT.markets_url)]
    pub markets_url: String,

    /// Chart height in pixels (candle and volume panes together)
    #[arg(long, default_value_t = CHART.view_height)]
    pub view_height: f64,
}

impl Cli {
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            relay_url: self.relay_url.clone(),
            markets_url: self.markets_url.clone(),
            chart: ChartConfig {
                view_height: self.view_height,
                ..CHART
            },
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, settings: AppSettings) -> Box<dyn eframe::App> {
    Box::new(CandleViewApp::new(cc, settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_point_at_local_relay() {
        let cli = Cli::parse_from(["candle-view"]);
        assert_eq!(cli.relay_url, CLIENT.relay_ws_url);
        assert_eq!(cli.settings().chart.view_height, CHART.view_height);
    }

    #[test]
    fn view_height_override_keeps_other_chart_settings() {
        let cli = Cli::parse_from(["candle-view", "--view-height", "420"]);
        let chart = cli.settings().chart;
        assert_eq!(chart.view_height, 420.0);
        assert_eq!(chart.candle_body_width, CHART.candle_body_width);
    }
}
