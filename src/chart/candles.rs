use eframe::egui::Color32;

use crate::chart::layout::ChartScales;
use crate::chart::scene::{LineStyle, Point, Scene};
use crate::config::chart::{VOLUME_BAR_OPACITY, WICK_WIDTH};
use crate::config::{CHART_COLORS, ChartConfig};
use crate::domain::{CandleType, Ohlcv};

/// Pixel boxes of one candle group: wick, body and volume bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    pub kind: CandleType,
    pub x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub volume_top: f64,
    pub volume_height: f64,
}

pub fn candle_color(kind: CandleType) -> Color32 {
    match kind {
        CandleType::Up => CHART_COLORS.candle_up,
        CandleType::Down => CHART_COLORS.candle_down,
    }
}

pub fn candle_geometry<C: Ohlcv>(candle: &C, scales: &ChartScales) -> CandleGeometry {
    let kind = candle.candle_type();
    let body_high = candle.open().max(candle.close());

    let wick_top = scales.price.scale(candle.highest());
    let wick_bottom = scales.price.scale(candle.lowest());
    let volume_top = scales.volume.scale(candle.volume());
    let volume_zero = scales.volume.scale(0.0);

    CandleGeometry {
        kind,
        x: scales.time.scale(candle.time() as f64),
        wick_top,
        wick_bottom,
        body_top: scales.price.scale(body_high),
        body_height: (scales.price.scale(candle.open()) - scales.price.scale(candle.close())).abs(),
        volume_top,
        volume_height: volume_zero - volume_top,
    }
}

/// One wick + body + volume bar per candle, in data order
pub fn draw_candles<C: Ohlcv>(scene: &mut Scene, data: &[C], scales: &ChartScales, config: &ChartConfig) {
    let half_body = config.candle_body_width / 2.0;

    for candle in data {
        let g = candle_geometry(candle, scales);
        let color = candle_color(g.kind);

        scene.line(
            Point::new(g.x, g.wick_top),
            Point::new(g.x, g.wick_bottom),
            LineStyle::solid(color, WICK_WIDTH),
        );
        scene.rect(
            Point::new(g.x - half_body, g.body_top),
            config.candle_body_width,
            g.body_height,
            color,
            1.0,
        );
        scene.rect(
            Point::new(g.x - half_body, g.volume_top),
            config.candle_body_width,
            g.volume_height,
            color,
            VOLUME_BAR_OPACITY,
        );
    }
}
