//! Gridlines, the pane divider and both axes.

use crate::chart::formats::Formatter;
use crate::chart::layout::{ChartLayout, ChartScales};
use crate::chart::scale::LinearScale;
use crate::chart::scene::{LineStyle, Point, Primitive, Scene, TextAnchor, TextBaseline};
use crate::config::chart::{DIVIDER_OPACITY, DIVIDER_WIDTH, GRID_LINE_WIDTH, GRID_OPACITY};
use crate::config::{CHART_COLORS, ChartConfig, OVERLAY};

/// Width of rendered label text. The axis panel is sized from this.
pub trait TextMeasure: Send + Sync {
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Fixed advance per character. Good enough for digits in a sans font, and has no backend.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    /// Advance as a fraction of the font size
    pub advance: f64,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        MonospaceMeasure { advance: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.advance
    }
}

fn grid_style() -> LineStyle {
    LineStyle::solid(CHART_COLORS.grid, GRID_LINE_WIDTH).with_opacity(GRID_OPACITY)
}

/// Horizontal lines at every price and volume tick, vertical lines at every candle
pub fn draw_grid(scene: &mut Scene, candle_xs: &[f64], scales: &ChartScales, layout: &ChartLayout, config: &ChartConfig) {
    let style = grid_style();

    for tick in &scales.price_ticks {
        scene.push(Primitive::HRule {
            y: scales.price.scale(*tick),
            style,
        });
    }
    for tick in &scales.volume_ticks {
        scene.push(Primitive::HRule {
            y: scales.volume.scale(*tick),
            style,
        });
    }

    let bottom = layout.plot_bottom(config);
    for x in candle_xs {
        scene.line(Point::new(*x, 0.0), Point::new(*x, bottom), style);
    }
}

/// Y of the line separating the price pane from the volume pane
pub fn divider_y(scales: &ChartScales, config: &ChartConfig) -> f64 {
    scales.volume.scale(scales.volume_max) - config.axis_y_space_between / 2.0
}

pub fn draw_divider(scene: &mut Scene, scales: &ChartScales, config: &ChartConfig) {
    scene.push(Primitive::HRule {
        y: divider_y(scales, config),
        style: LineStyle::solid(CHART_COLORS.grid, DIVIDER_WIDTH).with_opacity(DIVIDER_OPACITY),
    });
}

/// Right-oriented axis without a domain line: tick mark plus label per value
fn draw_axis_right(scene: &mut Scene, scale: &LinearScale, ticks: &[f64], format: &Formatter) {
    let tick_style = LineStyle::solid(CHART_COLORS.axis, 1.0);
    let label_x = OVERLAY.tick_size + OVERLAY.tick_padding;

    for tick in ticks {
        let y = scale.scale(*tick);
        scene.line(Point::new(0.0, y), Point::new(OVERLAY.tick_size, y), tick_style);
        scene.text(
            Point::new(label_x, y),
            format(*tick),
            CHART_COLORS.axis,
            OVERLAY.label_font_size,
            TextAnchor::Start,
            TextBaseline::Middle,
        );
    }
}

/// Price ticks then volume ticks, into the separate axis panel scene
pub fn draw_axis_y(
    scene: &mut Scene,
    scales: &ChartScales,
    price_format: &Formatter,
    volume_format: &Formatter,
) {
    draw_axis_right(scene, &scales.price, &scales.price_ticks, price_format);
    draw_axis_right(scene, &scales.volume, &scales.volume_ticks, volume_format);
}

/// Bottom axis at the plot bottom: domain line with end ticks, then a tick and label per candle
pub fn draw_axis_x(
    scene: &mut Scene,
    candle_times: &[f64],
    scales: &ChartScales,
    layout: &ChartLayout,
    config: &ChartConfig,
    format: &Formatter,
) {
    let base = layout.plot_bottom(config);
    let style = LineStyle::solid(CHART_COLORS.axis, 1.0);
    let (r0, r1) = scales.time.range();
    let tick = OVERLAY.tick_size;

    scene.line(Point::new(r0, base + tick), Point::new(r0, base), style);
    scene.line(Point::new(r0, base), Point::new(r1, base), style);
    scene.line(Point::new(r1, base), Point::new(r1, base + tick), style);

    for time in candle_times {
        let x = scales.time.scale(*time);
        scene.line(Point::new(x, base), Point::new(x, base + tick), style);
        scene.text(
            Point::new(x, base + tick + OVERLAY.tick_padding),
            format(*time),
            CHART_COLORS.axis,
            OVERLAY.label_font_size,
            TextAnchor::Middle,
            TextBaseline::Top,
        );
    }
}

/// Widest `label_x + text_width` among the labels of the axis panel; 0 with no labels
pub fn max_label_extent(scene: &Scene, measure: &dyn TextMeasure) -> f64 {
    scene
        .texts()
        .map(|(pos, text, size)| pos.x + measure.text_width(text, size))
        .fold(0.0, f64::max)
}
