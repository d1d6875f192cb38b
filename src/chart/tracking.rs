//! Crosshair overlay.
//!
//! Every pointer event is answered independently from the precomputed candle bands; nothing is
//! remembered between events. The returned `OverlayState` says which parts are visible and
//! where, and can be turned into primitives for the plot and for the axis panel.

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

use crate::chart::formats::AxisFormats;
use crate::chart::layout::{ChartLayout, ChartScales};
use crate::chart::scene::{LineStyle, Point, Primitive, TextAnchor, TextBaseline};
use crate::config::{CHART_COLORS, ChartConfig, OVERLAY};

/// Half-open pixel interval `[min, max)` owned by one candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    /// The candle's exact x
    pub value: f64,
}

impl Band {
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x < self.max
    }
}

/// Midpoint bisection between neighbouring candles. The first band starts at 0 and the last
/// one ends at `canvas_width`, so together they tile `[0, canvas_width)`.
pub fn compute_bands(candle_xs: &[f64], canvas_width: f64) -> Vec<Band> {
    let last = candle_xs.len().saturating_sub(1);
    candle_xs
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let min = if i == 0 {
                0.0
            } else {
                (candle_xs[i - 1] + x) / 2.0
            };
            let max = if i == last {
                canvas_width.max(x)
            } else {
                (x + candle_xs[i + 1]) / 2.0
            };
            Band { min, max, value: x }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerticalReadout {
    pub x: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalReadout {
    pub y: f64,
    pub label: String,
}

/// Visible overlay parts after one pointer event. `None` means hidden.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    /// Vertical crosshair plus time box at the plot bottom
    pub vertical: Option<VerticalReadout>,
    /// Horizontal crosshair plus value box in the axis panel
    pub horizontal: Option<HorizontalReadout>,
}

impl OverlayState {
    pub fn hidden() -> Self {
        OverlayState::default()
    }

    pub fn is_hidden(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    /// Crosshair lines and the time box, in plot coordinates
    pub fn plot_primitives(&self, plot_bottom: f64) -> Vec<Primitive> {
        let style = LineStyle::solid(CHART_COLORS.crosshair, OVERLAY.crosshair_width)
            .dashed(OVERLAY.crosshair_dash);
        let mut out = Vec::new();

        if let Some(v) = &self.vertical {
            out.push(Primitive::Line {
                from: Point::new(v.x, 0.0),
                to: Point::new(v.x, plot_bottom),
                style,
            });
            out.push(Primitive::Rect {
                min: Point::new(v.x - OVERLAY.info_box_width / 2.0, plot_bottom),
                width: OVERLAY.info_box_width,
                height: OVERLAY.info_box_height,
                fill: CHART_COLORS.info_box_fill,
                opacity: 1.0,
                corner_radius: 5.0,
            });
            out.push(Primitive::Text {
                pos: Point::new(
                    v.x - OVERLAY.info_box_width / 2.0 + OVERLAY.text_x_offset_x,
                    plot_bottom + OVERLAY.info_box_height / 2.0 + OVERLAY.text_x_offset_y,
                ),
                text: v.label.clone(),
                color: CHART_COLORS.info_box_text,
                size: OVERLAY.label_font_size,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Bottom,
            });
        }

        if let Some(h) = &self.horizontal {
            out.push(Primitive::HRule { y: h.y, style });
        }
        out
    }

    /// Value box in the axis panel, spanning its full width
    pub fn axis_primitives(&self, axis_width: f64) -> Vec<Primitive> {
        let Some(h) = &self.horizontal else {
            return Vec::new();
        };
        vec![
            Primitive::Rect {
                min: Point::new(0.0, h.y - OVERLAY.info_box_height / 2.0),
                width: axis_width,
                height: OVERLAY.info_box_height,
                fill: CHART_COLORS.info_box_fill,
                opacity: 1.0,
                corner_radius: 5.0,
            },
            Primitive::Text {
                pos: Point::new(
                    OVERLAY.text_y_offset_x,
                    h.y + OVERLAY.info_box_height / 2.0 - OVERLAY.text_y_offset_y,
                ),
                text: h.label.clone(),
                color: CHART_COLORS.info_box_text,
                size: OVERLAY.label_font_size,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Bottom,
            },
        ]
    }
}

/// Band table and the scales needed to label readouts
#[derive(Debug, Clone)]
pub struct MouseTracker {
    candle_xs: Vec<f64>,
    bands: Vec<Band>,
    canvas_width: f64,
    scales: ChartScales,
    plot_bottom: f64,
    pane_split_y: f64,
    formats: AxisFormats,
}

impl MouseTracker {
    pub fn new(
        candle_xs: Vec<f64>,
        canvas_width: f64,
        scales: ChartScales,
        layout: &ChartLayout,
        config: &ChartConfig,
        formats: AxisFormats,
    ) -> Self {
        MouseTracker {
            bands: compute_bands(&candle_xs, canvas_width),
            candle_xs,
            canvas_width,
            scales,
            plot_bottom: layout.plot_bottom(config),
            pane_split_y: layout.pane_split_y(config),
            formats,
        }
    }

    /// Rebuilds the bands only when the width actually changed
    pub fn set_canvas_width(&mut self, canvas_width: f64) {
        if canvas_width != self.canvas_width {
            self.canvas_width = canvas_width;
            self.bands = compute_bands(&self.candle_xs, canvas_width);
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Linear scan over the bands; datasets are small
    pub fn find_band(&self, x: f64) -> Option<Band> {
        self.bands.iter().find(|b| b.contains(x)).copied()
    }

    pub fn on_pointer_move(&self, x: f64, y: f64) -> OverlayState {
        if y > self.plot_bottom {
            return OverlayState::hidden();
        }

        let vertical = self.find_band(x).map(|band| VerticalReadout {
            x: band.value,
            label: (self.formats.axis_x_mouse_tracking_format)(self.scales.time.invert(band.value)),
        });

        let label = if y < self.pane_split_y {
            (self.formats.axis_y_mouse_tracking_format)(self.scales.price.invert(y))
        } else {
            (self.formats.axis_y_mouse_tracking_volume_format)(self.scales.volume.invert(y))
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_pointer_events {
            log::info!(
                "Pointer ({:.1}, {:.1}) -> band {:?}, readout {}",
                x,
                y,
                vertical.as_ref().map(|v| v.x),
                label
            );
        }

        OverlayState {
            vertical,
            horizontal: Some(HorizontalReadout { y, label }),
        }
    }

    pub fn on_pointer_leave(&self) -> OverlayState {
        OverlayState::hidden()
    }
}
