use eframe::egui::Color32;

/// UI Colors for consistent theming
#[derive(Clone, Copy)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub top_panel: Color32,
    pub central_panel: Color32,
    pub toast_error: Color32,
    pub toast_info: Color32,
    pub toast_fill: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub market_selector_width: f32,
    pub toast_width: f32,
    pub tooltip_font_size: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(71, 85, 105),
        heading: Color32::from_rgb(15, 23, 42),
        top_panel: Color32::from_rgb(248, 250, 252),
        central_panel: Color32::WHITE,
        toast_error: Color32::from_rgb(220, 38, 38),
        toast_info: Color32::from_rgb(37, 99, 235),
        toast_fill: Color32::from_rgb(255, 255, 255),
    },
    market_selector_width: 180.0,
    toast_width: 320.0,
    tooltip_font_size: 12.0,
};

/// Every user-visible string in one place
pub struct UiText {
    pub window_title: &'static str,
    pub market_heading: &'static str,
    pub market_placeholder: &'static str,
    pub markets_loading: &'static str,
    pub timeframe_heading: &'static str,
    pub chart_loading: &'static str,
    pub chart_empty: &'static str,
    pub status_connecting: &'static str,
    pub status_connected: &'static str,
    pub status_disconnected: &'static str,
    pub toast_markets_failed: &'static str,
    pub toast_upstream_error: &'static str,
    pub toast_exchange_connect_failed: &'static str,
    pub toast_exchange_disconnected: &'static str,
    pub toast_relay_closed: &'static str,
    pub toast_request_failed: &'static str,
}

pub static UI_TEXT: UiText = UiText {
    window_title: "Candle View",
    market_heading: "Market",
    market_placeholder: "Select market",
    markets_loading: "Loading markets...",
    timeframe_heading: "Timeframe",
    chart_loading: "Loading candles...",
    chart_empty: "Pick a market to load its chart",
    status_connecting: "Connecting to relay",
    status_connected: "Relay connected",
    status_disconnected: "Relay disconnected",
    toast_markets_failed: "Could not load markets",
    toast_upstream_error: "Exchange rejected the request",
    toast_exchange_connect_failed: "Could not connect to the exchange",
    toast_exchange_disconnected: "Exchange connection closed",
    toast_relay_closed: "Relay connection closed",
    toast_request_failed: "Could not send the candle request",
};
