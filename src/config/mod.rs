//! Configuration module for the chart viewer and the relay.

pub mod chart;
pub mod client;
pub mod relay;

mod debug; // Private: use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use chart::{CHART, CHART_COLORS, ChartConfig, OVERLAY, ViewWidth};
pub use client::CLIENT;
pub use relay::RELAY;
