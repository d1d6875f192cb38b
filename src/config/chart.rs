//! Chart geometry and colour configuration

use eframe::egui::Color32;

/// Horizontal sizing of the chart container
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewWidth {
    /// Take whatever width the parent gives
    Auto,
    /// Fixed pixel width
    Fixed(f64),
}

/// Spacing constants the layout is derived from. All values are pixels unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub view_height: f64,
    pub view_width: ViewWidth,
    pub margin_top: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    /// Gap between the price pane and the volume pane
    pub axis_y_space_between: f64,
    pub candles_space_between: f64,
    pub candle_body_width: f64,
    /// Percent of `view_height`
    pub candles_chart_pct: f64,
    /// Percent of `view_height`
    pub volume_chart_pct: f64,
    /// Price ticks on the Y axis
    pub price_tick_count: usize,
    /// Upper bound on volume ticks
    pub max_volume_tick_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        CHART
    }
}

pub const CHART: ChartConfig = ChartConfig {
    view_height: 600.0,
    view_width: ViewWidth::Auto,
    margin_top: 20.0,
    margin_left: 50.0,
    margin_right: 50.0,
    margin_bottom: 20.0,
    axis_y_space_between: 30.0,
    candles_space_between: 15.0,
    candle_body_width: 50.0,
    candles_chart_pct: 70.0,
    volume_chart_pct: 30.0,
    price_tick_count: 10,
    max_volume_tick_count: 4,
};

/// Pixel constants of the individual overlay pieces
pub struct OverlayMetrics {
    /// Crosshair readout box
    pub info_box_width: f64,
    pub info_box_height: f64,
    /// Text offsets inside the Y / X readout boxes
    pub text_y_offset_x: f64,
    pub text_y_offset_y: f64,
    pub text_x_offset_x: f64,
    pub text_x_offset_y: f64,
    pub crosshair_dash: f64,
    pub crosshair_width: f64,
    /// d3-style axis tick length and label padding
    pub tick_size: f64,
    pub tick_padding: f64,
    pub label_font_size: f64,
    /// Signal marker
    pub marker_width: f64,
    pub marker_height: f64,
    /// Transparent hover target around each marker
    pub pressing_area_width: f64,
    pub pressing_area_height: f64,
    /// Tooltip anchor sits this far right of the marker
    pub tooltip_anchor_offset_x: f64,
}

pub const OVERLAY: OverlayMetrics = OverlayMetrics {
    info_box_width: 100.0,
    info_box_height: 20.0,
    text_y_offset_x: 4.0,
    text_y_offset_y: 6.0,
    text_x_offset_x: 12.0,
    text_x_offset_y: 4.0,
    crosshair_dash: 4.0,
    crosshair_width: 1.5,
    tick_size: 6.0,
    tick_padding: 3.0,
    label_font_size: 10.0,
    marker_width: 15.0,
    marker_height: 15.0,
    pressing_area_width: 30.0,
    pressing_area_height: 30.0,
    tooltip_anchor_offset_x: 10.0,
};

pub struct ChartColors {
    pub candle_up: Color32,
    pub candle_down: Color32,
    pub grid: Color32,
    pub axis: Color32,
    pub crosshair: Color32,
    pub info_box_fill: Color32,
    pub info_box_text: Color32,
    pub signal_buy: Color32,
    pub signal_sell: Color32,
    pub tooltip_fill: Color32,
    pub tooltip_text: Color32,
    pub background: Color32,
}

pub const CHART_COLORS: ChartColors = ChartColors {
    candle_up: Color32::from_rgb(0, 128, 0),         // Green
    candle_down: Color32::from_rgb(255, 0, 0),       // Red
    grid: Color32::from_rgb(128, 128, 128),          // Gray
    axis: Color32::from_rgb(0, 0, 0),
    crosshair: Color32::from_rgb(0, 0, 0),
    info_box_fill: Color32::from_rgb(229, 231, 235), // #e5e7eb
    info_box_text: Color32::from_rgb(15, 23, 42),    // #0f172a
    signal_buy: Color32::from_rgb(34, 197, 94),      // #22c55e
    signal_sell: Color32::from_rgb(239, 68, 68),     // #ef4444
    tooltip_fill: Color32::from_rgb(243, 244, 246),  // #f3f4f6
    tooltip_text: Color32::from_rgb(15, 23, 42),
    background: Color32::WHITE,
};

/// Opacity of grid lines
pub const GRID_OPACITY: f32 = 0.4;
pub const GRID_LINE_WIDTH: f64 = 0.5;
/// Opacity of volume bars
pub const VOLUME_BAR_OPACITY: f32 = 0.5;
pub const WICK_WIDTH: f64 = 1.5;
pub const DIVIDER_OPACITY: f32 = 0.7;
pub const DIVIDER_WIDTH: f64 = 2.0;
