use crate::chart::scale::{LinearScale, UNIT_DOMAIN};
use crate::config::ChartConfig;
use crate::domain::Ohlcv;
use crate::utils::maths_utils::{calculate_percentage, generate_number_range, get_min_max};

/// Pixel geometry derived from candle count and spacing constants.
/// Recomputed for every new dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub candle_count: usize,
    /// `count * (body + spacing)`; right end of the time range
    pub plot_width: f64,
    /// Full drawable width including right margin and half a candle
    pub svg_width: f64,
    pub half_candle_width: f64,
    pub candles_pane_px: f64,
    pub volume_pane_px: f64,
    pub view_height: f64,
}

impl ChartLayout {
    pub fn compute(candle_count: usize, config: &ChartConfig) -> Self {
        let plot_width =
            candle_count as f64 * (config.candle_body_width + config.candles_space_between);
        let half_candle_width = config.candle_body_width / 2.0;
        ChartLayout {
            candle_count,
            plot_width,
            svg_width: plot_width + config.margin_right + half_candle_width,
            half_candle_width,
            candles_pane_px: calculate_percentage(config.view_height, config.candles_chart_pct),
            volume_pane_px: calculate_percentage(config.view_height, config.volume_chart_pct),
            view_height: config.view_height,
        }
    }

    /// Pointer y at which readouts switch from price to volume
    pub fn pane_split_y(&self, config: &ChartConfig) -> f64 {
        self.candles_pane_px + config.axis_y_space_between / 2.0
    }

    /// Y of the X axis, also the lower bound of every overlay
    pub fn plot_bottom(&self, config: &ChartConfig) -> f64 {
        self.view_height - config.margin_bottom
    }
}

/// Observed extrema of one dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBounds {
    pub time: (f64, f64),
    pub price: (f64, f64),
    pub volume: (f64, f64),
}

impl DataBounds {
    /// `None` for an empty dataset
    pub fn from_candles<C: Ohlcv>(data: &[C]) -> Option<Self> {
        let times: Vec<f64> = data.iter().map(|c| c.time() as f64).collect();
        let lows: Vec<f64> = data.iter().map(|c| c.lowest()).collect();
        let highs: Vec<f64> = data.iter().map(|c| c.highest()).collect();
        let volumes: Vec<f64> = data.iter().map(|c| c.volume()).collect();

        let time = get_min_max(&times)?;
        let (price_min, _) = get_min_max(&lows)?;
        let (_, price_max) = get_min_max(&highs)?;
        let volume = get_min_max(&volumes)?;

        Some(DataBounds {
            time,
            price: (price_min, price_max),
            volume,
        })
    }
}

/// The three scales of one chart instance plus the tick values drawn against them
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScales {
    pub time: LinearScale,
    pub price: LinearScale,
    pub volume: LinearScale,
    /// Upper end of the volume domain (after degenerate widening)
    pub volume_max: f64,
    pub price_ticks: Vec<f64>,
    pub volume_ticks: Vec<f64>,
}

impl ChartScales {
    pub fn new(bounds: Option<DataBounds>, layout: &ChartLayout, config: &ChartConfig) -> Self {
        let (time_domain, price_domain, volume_range) = match bounds {
            Some(b) => (b.time, b.price, b.volume),
            None => (UNIT_DOMAIN, UNIT_DOMAIN, UNIT_DOMAIN),
        };

        let time = LinearScale::new(
            time_domain,
            (layout.half_candle_width + config.margin_left, layout.plot_width),
        );
        let price = LinearScale::new(price_domain, (layout.candles_pane_px, config.margin_top));
        let volume = LinearScale::new(
            (0.0, volume_range.1),
            (
                layout.candles_pane_px + layout.volume_pane_px - config.margin_bottom,
                layout.candles_pane_px + config.axis_y_space_between,
            ),
        );
        let volume_max = volume.domain().1;

        let (price_min, price_max) = price.domain();
        let price_ticks = generate_number_range(price_min, price_max, config.price_tick_count);
        let volume_ticks = generate_number_range(
            volume_range.0,
            volume_range.1,
            volume_tick_count(layout.candle_count, config.max_volume_tick_count),
        );

        ChartScales {
            time,
            price,
            volume,
            volume_max,
            price_ticks,
            volume_ticks,
        }
    }
}

/// `max_ticks` once there are more candles than that, otherwise one fewer than the candle count.
/// The sampler never returns fewer than two values.
pub fn volume_tick_count(candle_count: usize, max_ticks: usize) -> usize {
    if candle_count > max_ticks {
        max_ticks
    } else {
        candle_count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHART;
    use crate::domain::Candle;

    fn sample() -> Vec<Candle> {
        vec![
            Candle::new(1_000, 10.0, 12.0, 13.0, 9.0, 500.0),
            Candle::new(2_000, 12.0, 11.0, 14.0, 10.5, 200.0),
            Candle::new(3_000, 11.0, 15.0, 16.0, 10.0, 800.0),
        ]
    }

    #[test]
    fn layout_follows_spacing_constants() {
        let layout = ChartLayout::compute(3, &CHART);
        assert_eq!(layout.plot_width, 195.0);
        assert_eq!(layout.svg_width, 195.0 + 50.0 + 25.0);
        assert_eq!(layout.candles_pane_px, 420.0);
        assert_eq!(layout.volume_pane_px, 180.0);
        assert_eq!(layout.pane_split_y(&CHART), 435.0);
        assert_eq!(layout.plot_bottom(&CHART), 580.0);
    }

    #[test]
    fn scales_use_data_extrema() {
        let data = sample();
        let layout = ChartLayout::compute(data.len(), &CHART);
        let scales = ChartScales::new(DataBounds::from_candles(&data), &layout, &CHART);

        assert_eq!(scales.time.domain(), (1_000.0, 3_000.0));
        assert_eq!(scales.time.range(), (75.0, 195.0));
        assert_eq!(scales.price.domain(), (9.0, 16.0));
        assert_eq!(scales.price.range(), (420.0, 20.0));
        assert_eq!(scales.volume.domain(), (0.0, 800.0));
        assert_eq!(scales.volume.range(), (580.0, 450.0));
        assert_eq!(scales.volume_max, 800.0);

        assert_eq!(scales.price_ticks.len(), 10);
        assert_eq!(scales.price_ticks[0], 9.0);
        assert_eq!(scales.price_ticks[9], 16.0);
        // three candles -> two volume ticks, from the smallest observed volume
        assert_eq!(scales.volume_ticks, vec![200.0, 800.0]);
    }

    #[test]
    fn empty_dataset_uses_unit_domains() {
        let data: Vec<Candle> = Vec::new();
        let layout = ChartLayout::compute(0, &CHART);
        let scales = ChartScales::new(DataBounds::from_candles(&data), &layout, &CHART);

        assert_eq!(layout.plot_width, 0.0);
        assert_eq!(scales.time.domain(), UNIT_DOMAIN);
        assert_eq!(scales.price.domain(), UNIT_DOMAIN);
        assert_eq!(scales.volume.domain(), UNIT_DOMAIN);
        assert!(scales.price.scale(0.5).is_finite());
    }

    #[test]
    fn flat_dataset_does_not_collapse_scales() {
        let data = vec![Candle::new(1_000, 5.0, 5.0, 5.0, 5.0, 0.0)];
        let layout = ChartLayout::compute(1, &CHART);
        let scales = ChartScales::new(DataBounds::from_candles(&data), &layout, &CHART);

        assert_eq!(scales.price.domain(), (5.0, 6.0));
        assert_eq!(scales.volume.domain(), (0.0, 1.0));
        assert_eq!(scales.time.domain(), (1_000.0, 1_001.0));
        assert!(scales.price.invert(scales.price.scale(5.5)).is_finite());
    }

    #[test]
    fn volume_tick_count_caps_at_max() {
        assert_eq!(volume_tick_count(10, 4), 4);
        assert_eq!(volume_tick_count(5, 4), 4);
        assert_eq!(volume_tick_count(4, 4), 3);
        assert_eq!(volume_tick_count(1, 4), 0);
        assert_eq!(volume_tick_count(0, 4), 0);
    }
}
