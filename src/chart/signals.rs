//! Buy/sell markers and the hover logic that drives the tooltip.

use std::str::FromStr;

use eframe::egui::Color32;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

use crate::chart::error::ChartError;
use crate::chart::layout::ChartScales;
use crate::chart::scene::{Point, Primitive};
use crate::chart::tooltip::{Tooltip, TooltipStyle, TooltipTemplate, Visibility};
use crate::config::{CHART_COLORS, OVERLAY};
use crate::domain::{SignalPoint, SignalType};

/// Where the tooltip opens relative to the marker. Only one mode exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    RightStart,
}

impl FromStr for Placement {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right-start" => Ok(Placement::RightStart),
            other => Err(ChartError::InvalidPlacement(other.to_string())),
        }
    }
}

/// Pointer position for one hover event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// In chart (plot scene) coordinates
    pub x: f64,
    pub y: f64,
    /// Horizontal position inside the visible chart container, i.e. after scrolling
    pub layer_x: f64,
}

/// Tooltip anchor for a marker anchored at (`x`, `y`).
/// `right-start`: `left = layer_x + (x - hit_w/2 - pointer_x + hit_w)`, `top = y`.
pub fn position_relative_to_signal(
    x: f64,
    y: f64,
    pointer: &PointerEvent,
    placement: &str,
) -> Result<TooltipStyle, ChartError> {
    match placement.parse::<Placement>()? {
        Placement::RightStart => {
            let half = OVERLAY.pressing_area_width / 2.0;
            let left = x - half - pointer.x + OVERLAY.pressing_area_width;
            Ok(TooltipStyle {
                left: pointer.layer_x + left,
                top: y,
            })
        }
    }
}

pub fn signal_color(kind: SignalType) -> Color32 {
    match kind {
        SignalType::Buy => CHART_COLORS.signal_buy,
        SignalType::Sell => CHART_COLORS.signal_sell,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalMarker {
    pub x: f64,
    pub y: f64,
    pub kind: SignalType,
    pub template: TooltipTemplate,
}

impl SignalMarker {
    /// Arrowhead centred on the marker: pointing up for buy, down for sell
    pub fn primitive(&self) -> Primitive {
        let hw = OVERLAY.marker_width / 2.0;
        let hh = OVERLAY.marker_height / 2.0;
        let points = match self.kind {
            SignalType::Buy => vec![
                Point::new(self.x, self.y - hh),
                Point::new(self.x + hw, self.y + hh),
                Point::new(self.x - hw, self.y + hh),
            ],
            SignalType::Sell => vec![
                Point::new(self.x - hw, self.y - hh),
                Point::new(self.x + hw, self.y - hh),
                Point::new(self.x, self.y + hh),
            ],
        };
        Primitive::Polygon {
            points,
            fill: signal_color(self.kind),
            opacity: 1.0,
        }
    }

    /// Inside the transparent hit rectangle centred on the marker
    pub fn hit(&self, x: f64, y: f64) -> bool {
        (x - self.x).abs() <= OVERLAY.pressing_area_width / 2.0
            && (y - self.y).abs() <= OVERLAY.pressing_area_height / 2.0
    }
}

/// Markers at `(time_scale(time), price_scale(price))`, content built by `template`
pub fn build_markers<S, F>(signals: &[S], scales: &ChartScales, template: F) -> Vec<SignalMarker>
where
    S: SignalPoint,
    F: Fn(&S) -> TooltipTemplate,
{
    signals
        .iter()
        .map(|s| SignalMarker {
            x: scales.time.scale(s.time() as f64),
            y: scales.price.scale(s.price()),
            kind: s.kind(),
            template: template(s),
        })
        .collect()
}

/// Markers of one chart plus the single tooltip they share
#[derive(Debug, Clone, Default)]
pub struct SignalOverlay {
    markers: Vec<SignalMarker>,
    tooltip: Tooltip,
    hovered: Option<usize>,
}

impl SignalOverlay {
    pub fn new(markers: Vec<SignalMarker>) -> Self {
        SignalOverlay {
            markers,
            tooltip: Tooltip::default(),
            hovered: None,
        }
    }

    pub fn markers(&self) -> &[SignalMarker] {
        &self.markers
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Topmost marker under the pointer (later markers are drawn over earlier ones)
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.markers.iter().rposition(|m| m.hit(x, y))
    }

    pub fn pointer_enter(&mut self, index: usize, pointer: &PointerEvent) -> Result<(), ChartError> {
        let marker = self
            .markers
            .get(index)
            .ok_or(ChartError::UnknownSignal(index))?;
        let position = position_relative_to_signal(
            marker.x + OVERLAY.tooltip_anchor_offset_x,
            marker.y,
            pointer,
            "right-start",
        )?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_pointer_events {
            log::info!("Signal {} ({}) entered, tooltip at {:?}", index, marker.kind, position);
        }

        let template = marker.template.clone();
        self.tooltip
            .set_style(position)
            .set_visibility(Visibility::Visible)
            .set_template(template);
        self.hovered = Some(index);
        Ok(())
    }

    /// Hides the tooltip; content stays until the next enter overwrites it
    pub fn pointer_leave(&mut self) {
        self.tooltip.set_visibility(Visibility::Hidden);
        self.hovered = None;
    }

    /// Turns a raw pointer move into enter/leave transitions
    pub fn on_pointer_move(&mut self, pointer: &PointerEvent) -> Result<(), ChartError> {
        let hit = self.hit_test(pointer.x, pointer.y);
        if hit == self.hovered {
            return Ok(());
        }
        if self.hovered.is_some() {
            self.pointer_leave();
        }
        match hit {
            Some(index) => self.pointer_enter(index, pointer),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::{ChartLayout, DataBounds};
    use crate::config::CHART;
    use crate::domain::{Candle, Signal};

    fn marker(x: f64, y: f64, kind: SignalType) -> SignalMarker {
        SignalMarker {
            x,
            y,
            kind,
            template: TooltipTemplate::default().row("Price", format!("{}", y)),
        }
    }

    #[test]
    fn right_start_offsets_from_pointer() {
        let pointer = PointerEvent {
            x: 205.0,
            y: 100.0,
            layer_x: 180.0,
        };
        let style = position_relative_to_signal(210.0, 100.0, &pointer, "right-start").unwrap();
        // 180 + (210 - 15 - 205 + 30)
        assert_eq!(style.left, 200.0);
        assert_eq!(style.top, 100.0);
    }

    #[test]
    fn other_placements_fail() {
        let pointer = PointerEvent {
            x: 0.0,
            y: 0.0,
            layer_x: 0.0,
        };
        let err = position_relative_to_signal(0.0, 0.0, &pointer, "left-end").unwrap_err();
        assert_eq!(err, ChartError::InvalidPlacement("left-end".to_string()));
        assert!("right-start".parse::<Placement>().is_ok());
    }

    #[test]
    fn markers_use_both_scales() {
        let data = vec![
            Candle::new(1_000, 10.0, 12.0, 13.0, 9.0, 5.0),
            Candle::new(2_000, 12.0, 11.0, 14.0, 8.0, 7.0),
        ];
        let layout = ChartLayout::compute(data.len(), &CHART);
        let scales = ChartScales::new(DataBounds::from_candles(&data), &layout, &CHART);
        let signals = vec![Signal {
            kind: SignalType::Buy,
            time: 1_500,
            price: 11.0,
            volume: 6.0,
        }];

        let markers = build_markers(&signals, &scales, |_| TooltipTemplate::default());
        assert_eq!(markers[0].x, scales.time.scale(1_500.0));
        assert_eq!(markers[0].y, scales.price.scale(11.0));
        match markers[0].primitive() {
            Primitive::Polygon { points, fill, .. } => {
                assert_eq!(fill, CHART_COLORS.signal_buy);
                // apex on top for buy
                assert!(points[0].y < points[1].y);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn hit_area_is_thirty_square() {
        let m = marker(100.0, 100.0, SignalType::Sell);
        assert!(m.hit(115.0, 85.0));
        assert!(!m.hit(115.5, 100.0));
        assert!(!m.hit(100.0, 116.0));
    }

    #[test]
    fn enter_then_leave_toggles_visibility_only() {
        let mut overlay = SignalOverlay::new(vec![
            marker(100.0, 100.0, SignalType::Buy),
            marker(300.0, 50.0, SignalType::Sell),
        ]);

        let over_first = PointerEvent {
            x: 101.0,
            y: 99.0,
            layer_x: 101.0,
        };
        overlay.on_pointer_move(&over_first).unwrap();
        assert_eq!(overlay.hovered(), Some(0));
        assert!(overlay.tooltip().is_visible());
        assert_eq!(overlay.tooltip().style().top, 100.0);

        let away = PointerEvent {
            x: 200.0,
            y: 200.0,
            layer_x: 200.0,
        };
        overlay.on_pointer_move(&away).unwrap();
        assert!(!overlay.tooltip().is_visible());
        assert_eq!(
            overlay.tooltip().template().map(|t| t.rows[0].value.clone()),
            Some("100".to_string())
        );

        let over_second = PointerEvent {
            x: 300.0,
            y: 50.0,
            layer_x: 300.0,
        };
        overlay.on_pointer_move(&over_second).unwrap();
        assert_eq!(overlay.hovered(), Some(1));
        assert_eq!(
            overlay.tooltip().template().map(|t| t.rows[0].value.clone()),
            Some("50".to_string())
        );
    }

    #[test]
    fn unknown_index_is_an_error() {
        let mut overlay = SignalOverlay::default();
        let pointer = PointerEvent {
            x: 0.0,
            y: 0.0,
            layer_x: 0.0,
        };
        assert_eq!(
            overlay.pointer_enter(3, &pointer),
            Err(ChartError::UnknownSignal(3))
        );
    }
}
