use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

use crate::chart::axis::{
    MonospaceMeasure, TextMeasure, draw_axis_x, draw_axis_y, draw_divider, draw_grid,
    max_label_extent,
};
use crate::chart::candles::draw_candles;
use crate::chart::error::ChartError;
use crate::chart::formats::AxisFormats;
use crate::chart::layout::{ChartLayout, ChartScales, DataBounds};
use crate::chart::scene::Scene;
use crate::chart::signals::{PointerEvent, SignalOverlay, build_markers};
use crate::chart::tooltip::TooltipTemplate;
use crate::chart::tracking::{MouseTracker, OverlayState};
use crate::config::ChartConfig;
use crate::domain::{Candle, Ohlcv, SignalPoint};

/// Narrow interface the viewer holds on to; everything else lives in `ChartInstance`
pub trait ChartHandle {
    fn set_loading(&mut self, loading: bool);
    fn create<C: Ohlcv>(&mut self, data: &[C], formats: AxisFormats) -> ChartInstance;
}

/// Horizontal sizing of the plot after the latest container measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartWidth {
    /// Container is wider than the chart: stretch to it
    Fill,
    /// Fixed at the chart's own width; the container scrolls
    Fixed(f64),
}

/// Owner of the loading flag and the chart configuration
#[derive(Debug, Clone, Default)]
pub struct CandlestickChart {
    config: ChartConfig,
    loading: bool,
}

impl CandlestickChart {
    pub fn new(config: ChartConfig) -> Self {
        CandlestickChart {
            config,
            loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

impl ChartHandle for CandlestickChart {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn create<C: Ohlcv>(&mut self, data: &[C], formats: AxisFormats) -> ChartInstance {
        self.loading = false;
        ChartInstance::new(data, formats, self.config)
    }
}

/// Everything derived from one dataset. Built fresh by `create`, dropped with the dataset.
pub struct ChartInstance {
    config: ChartConfig,
    formats: AxisFormats,
    candles: Vec<Candle>,
    layout: ChartLayout,
    scales: ChartScales,
    measure: Arc<dyn TextMeasure>,
    chart_width: ChartWidth,
    container_width: f64,
    axis_y_width: f64,
    plot: Scene,
    /// Plot primitives below this index belong to `draw`; the signal markers follow
    plot_base_len: usize,
    axis_y: Scene,
    tracker: Option<MouseTracker>,
    signals: SignalOverlay,
}

impl ChartInstance {
    fn new<C: Ohlcv>(data: &[C], formats: AxisFormats, config: ChartConfig) -> Self {
        let candles: Vec<Candle> = data
            .iter()
            .map(|c| Candle::new(c.time(), c.open(), c.close(), c.highest(), c.lowest(), c.volume()))
            .collect();
        let layout = ChartLayout::compute(candles.len(), &config);
        let scales = ChartScales::new(DataBounds::from_candles(&candles), &layout, &config);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_chart_layout {
            log::info!("Chart layout for {} candles: {:?}", candles.len(), layout);
        }

        ChartInstance {
            config,
            formats,
            candles,
            plot: Scene::new(layout.svg_width, layout.view_height),
            plot_base_len: 0,
            axis_y: Scene::new(0.0, layout.view_height),
            chart_width: ChartWidth::Fixed(layout.svg_width),
            container_width: 0.0,
            axis_y_width: 0.0,
            layout,
            scales,
            measure: Arc::new(MonospaceMeasure::default()),
            tracker: None,
            signals: SignalOverlay::default(),
        }
    }

    /// Swap the label measurer (the viewer uses real font metrics)
    pub fn with_text_measure(mut self, measure: Arc<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    /// Full redraw in the fixed pass order. Markers from an earlier `draw_signals` are put back on top.
    pub fn draw(&mut self) {
        self.plot.clear();
        self.axis_y.clear();
        let container = self.container_width;
        self.handle_container_width_change(container);
        self.draw_axis_y();
        self.draw_grid();
        self.draw_axis_x();
        self.draw_candles();
        self.draw_line_between_charts();
        self.draw_mouse_tracking();
        self.plot_base_len = self.plot.primitives.len();
        self.emit_markers();
    }

    /// Fill the container when it is wider than the chart, otherwise keep the chart width
    pub fn handle_container_width_change(&mut self, container_width: f64) -> ChartWidth {
        self.container_width = container_width;
        self.chart_width = if container_width > self.layout.svg_width {
            ChartWidth::Fill
        } else {
            ChartWidth::Fixed(self.layout.svg_width)
        };
        let canvas_width = self.canvas_width();
        self.plot.width = canvas_width;
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.set_canvas_width(canvas_width);
        }
        self.chart_width
    }

    /// One measuring pass over the axis labels; sets the axis panel width
    pub fn calculate_max_axis_y_width(&mut self) -> f64 {
        self.axis_y_width = max_label_extent(&self.axis_y, self.measure.as_ref());
        self.axis_y.width = self.axis_y_width;
        self.axis_y_width
    }

    /// Arms pointer tracking with the current band table
    pub fn draw_mouse_tracking(&mut self) {
        self.tracker = Some(MouseTracker::new(
            self.candle_xs(),
            self.canvas_width(),
            self.scales.clone(),
            &self.layout,
            &self.config,
            self.formats.clone(),
        ));
    }

    pub fn draw_grid(&mut self) {
        let xs = self.candle_xs();
        draw_grid(&mut self.plot, &xs, &self.scales, &self.layout, &self.config);
    }

    pub fn draw_candles(&mut self) {
        draw_candles(&mut self.plot, &self.candles, &self.scales, &self.config);
    }

    pub fn draw_axis_x(&mut self) {
        let times: Vec<f64> = self.candles.iter().map(|c| c.time as f64).collect();
        draw_axis_x(
            &mut self.plot,
            &times,
            &self.scales,
            &self.layout,
            &self.config,
            &self.formats.axis_x_format,
        );
    }

    pub fn draw_axis_y(&mut self) {
        draw_axis_y(
            &mut self.axis_y,
            &self.scales,
            &self.formats.axis_y_format,
            &self.formats.axis_y_volume_format,
        );
        self.calculate_max_axis_y_width();
    }

    pub fn draw_line_between_charts(&mut self) {
        draw_divider(&mut self.plot, &self.scales, &self.config);
    }

    /// Markers go on top of the plot scene, replacing any previous set; hover state is kept for
    /// the tooltip
    pub fn draw_signals<S, F>(&mut self, signals: &[S], template: F)
    where
        S: SignalPoint,
        F: Fn(&S) -> TooltipTemplate,
    {
        let markers = build_markers(signals, &self.scales, template);
        self.signals = SignalOverlay::new(markers);
        self.emit_markers();
    }

    fn emit_markers(&mut self) {
        self.plot.primitives.truncate(self.plot_base_len);
        self.plot.extend(self.signals.markers().iter().map(|m| m.primitive()));
    }

    /// Crosshair for a pointer at plot coordinates; hidden until tracking is armed
    pub fn on_pointer_move(&self, x: f64, y: f64) -> OverlayState {
        match &self.tracker {
            Some(tracker) => tracker.on_pointer_move(x, y),
            None => OverlayState::hidden(),
        }
    }

    pub fn on_pointer_leave(&mut self) -> OverlayState {
        self.signals.pointer_leave();
        match &self.tracker {
            Some(tracker) => tracker.on_pointer_leave(),
            None => OverlayState::hidden(),
        }
    }

    pub fn on_signal_pointer(&mut self, pointer: &PointerEvent) -> Result<(), ChartError> {
        self.signals.on_pointer_move(pointer)
    }

    pub fn canvas_width(&self) -> f64 {
        match self.chart_width {
            ChartWidth::Fill => self.container_width,
            ChartWidth::Fixed(width) => width,
        }
    }

    pub fn candle_xs(&self) -> Vec<f64> {
        self.candles
            .iter()
            .map(|c| self.scales.time.scale(c.time as f64))
            .collect()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn plot_scene(&self) -> &Scene {
        &self.plot
    }

    pub fn axis_scene(&self) -> &Scene {
        &self.axis_y
    }

    pub fn axis_y_width(&self) -> f64 {
        self.axis_y_width
    }

    pub fn chart_width(&self) -> ChartWidth {
        self.chart_width
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn scales(&self) -> &ChartScales {
        &self.scales
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn signals(&self) -> &SignalOverlay {
        &self.signals
    }

    /// Plot and axis panel side by side, with the panel attached on the right
    pub fn to_svg(&self) -> String {
        let width = self.canvas_width() + self.axis_y_width;
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = width,
            h = self.layout.view_height
        );
        out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
        self.plot.write_svg_body(&mut out, 0.0);
        self.axis_y.write_svg_body(&mut out, self.canvas_width());
        out.push_str("</svg>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scene::Primitive;
    use crate::config::CHART;
    use crate::domain::{Signal, SignalType};

    fn candles(n: i64) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                Candle::new(1_700_000_000 + i * 86_400, base, base + 2.0, base + 3.0, base - 1.0, 10.0 * (i + 1) as f64)
            })
            .collect()
    }

    #[test]
    fn create_clears_loading() {
        let mut chart = CandlestickChart::new(CHART);
        chart.set_loading(true);
        assert!(chart.is_loading());
        let _instance = chart.create(&candles(3), AxisFormats::default());
        assert!(!chart.is_loading());
    }

    #[test]
    fn draw_fills_plot_and_axis_scenes() {
        let mut chart = CandlestickChart::new(CHART);
        let mut instance = chart.create(&candles(6), AxisFormats::default());
        instance.draw();

        // grid 10 + 4 rules, 6 vertical lines, axis-x 3 domain lines + 6 ticks + 6 labels,
        // 3 primitives per candle, divider
        assert_eq!(instance.plot_scene().primitives.len(), 14 + 6 + 15 + 18 + 1);
        // 14 ticks + 14 labels
        assert_eq!(instance.axis_scene().primitives.len(), 28);
        assert!(instance.axis_y_width() > 9.0);
        assert_eq!(instance.axis_scene().width, instance.axis_y_width());
    }

    #[test]
    fn redraw_does_not_accumulate() {
        let mut chart = CandlestickChart::default();
        let mut instance = chart.create(&candles(4), AxisFormats::default());
        instance.draw();
        let first = instance.plot_scene().primitives.len();
        instance.draw();
        assert_eq!(instance.plot_scene().primitives.len(), first);
    }

    #[test]
    fn container_width_switches_between_fill_and_fixed() {
        let mut chart = CandlestickChart::new(CHART);
        let mut instance = chart.create(&candles(3), AxisFormats::default());
        let svg_width = instance.layout().svg_width;

        assert_eq!(instance.handle_container_width_change(svg_width + 100.0), ChartWidth::Fill);
        assert_eq!(instance.canvas_width(), svg_width + 100.0);

        assert_eq!(
            instance.handle_container_width_change(svg_width - 1.0),
            ChartWidth::Fixed(svg_width)
        );
        assert_eq!(instance.canvas_width(), svg_width);
        // equal is not wider
        assert_eq!(
            instance.handle_container_width_change(svg_width),
            ChartWidth::Fixed(svg_width)
        );
    }

    #[test]
    fn zero_candles_render_without_panicking() {
        let mut chart = CandlestickChart::new(CHART);
        let empty: Vec<Candle> = Vec::new();
        let mut instance = chart.create(&empty, AxisFormats::default());
        instance.draw();
        instance.draw_signals(&Vec::<Signal>::new(), |_| TooltipTemplate::default());

        assert!(instance.candles().is_empty());
        assert!(!instance.plot_scene().primitives.iter().any(|p| matches!(p, Primitive::Polygon { .. })));
        let state = instance.on_pointer_move(10.0, 10.0);
        assert!(state.vertical.is_none());
        assert!(instance.to_svg().contains("</svg>"));
    }

    #[test]
    fn tracking_is_armed_by_draw() {
        let mut chart = CandlestickChart::new(CHART);
        let mut instance = chart.create(&candles(3), AxisFormats::default());
        assert!(instance.on_pointer_move(80.0, 100.0).is_hidden());

        instance.draw();
        let xs = instance.candle_xs();
        let state = instance.on_pointer_move(xs[1], 100.0);
        assert_eq!(state.vertical.map(|v| v.x), Some(xs[1]));
        assert!(instance.on_pointer_leave().is_hidden());
    }

    fn marker_count(instance: &ChartInstance) -> usize {
        instance
            .plot_scene()
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Polygon { .. }))
            .count()
    }

    #[test]
    fn redraw_keeps_signal_markers() {
        let mut chart = CandlestickChart::new(CHART);
        let data = candles(4);
        let mut instance = chart.create(&data, AxisFormats::default());
        instance.draw();

        let signals = vec![Signal {
            kind: SignalType::Buy,
            time: data[2].time,
            price: 103.0,
            volume: 30.0,
        }];
        instance.draw_signals(&signals, |_| TooltipTemplate::default());
        let with_markers = instance.plot_scene().primitives.len();

        instance.draw();
        assert_eq!(marker_count(&instance), instance.signals().markers().len());
        assert_eq!(marker_count(&instance), 1);
        assert_eq!(instance.plot_scene().primitives.len(), with_markers);
        // markers stay the last thing painted
        assert!(matches!(
            instance.plot_scene().primitives.last(),
            Some(Primitive::Polygon { .. })
        ));
    }

    #[test]
    fn drawing_signals_again_replaces_markers() {
        let mut chart = CandlestickChart::new(CHART);
        let data = candles(4);
        let mut instance = chart.create(&data, AxisFormats::default());
        instance.draw();

        let signal = |time| Signal {
            kind: SignalType::Sell,
            time,
            price: 102.0,
            volume: 20.0,
        };
        instance.draw_signals(&[signal(data[0].time), signal(data[1].time)], |_| TooltipTemplate::default());
        assert_eq!(marker_count(&instance), 2);
        instance.draw_signals(&[signal(data[3].time)], |_| TooltipTemplate::default());
        assert_eq!(marker_count(&instance), 1);
    }

    #[test]
    fn width_change_moves_the_last_band_edge() {
        let mut chart = CandlestickChart::new(CHART);
        let mut instance = chart.create(&candles(3), AxisFormats::default());
        instance.draw();
        let svg_width = instance.layout().svg_width;
        let last_x = instance.candle_xs()[2];

        let beyond = svg_width + 50.0;
        assert!(instance.on_pointer_move(beyond, 100.0).vertical.is_none());
        instance.handle_container_width_change(svg_width + 100.0);
        assert_eq!(instance.on_pointer_move(beyond, 100.0).vertical.map(|v| v.x), Some(last_x));
    }

    #[test]
    fn signals_add_markers_and_drive_tooltip() {
        let mut chart = CandlestickChart::new(CHART);
        let data = candles(3);
        let mut instance = chart.create(&data, AxisFormats::default());
        instance.draw();
        let before = instance.plot_scene().primitives.len();

        let signals = vec![Signal {
            kind: SignalType::Sell,
            time: data[1].time,
            price: 101.5,
            volume: 15.0,
        }];
        instance.draw_signals(&signals, |s| TooltipTemplate::default().row("Price", s.price.to_string()));
        assert_eq!(instance.plot_scene().primitives.len(), before + 1);

        let marker = instance.signals().markers()[0].clone();
        let pointer = PointerEvent {
            x: marker.x,
            y: marker.y,
            layer_x: marker.x,
        };
        instance.on_signal_pointer(&pointer).unwrap();
        assert!(instance.signals().tooltip().is_visible());

        instance.on_pointer_leave();
        assert!(!instance.signals().tooltip().is_visible());
    }
}
