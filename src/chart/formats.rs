use std::fmt;
use std::sync::Arc;

use crate::utils::TimeUtils;
use crate::utils::format_utils::{format_price, format_volume};
use crate::utils::time_utils::format_epoch_sec_f64;

/// Formats one axis value (price, volume or unix seconds) into a label
pub type Formatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Caller-supplied label formatting, one callback per axis and per crosshair readout
#[derive(Clone)]
pub struct AxisFormats {
    pub axis_y_format: Formatter,
    pub axis_y_volume_format: Formatter,
    pub axis_x_format: Formatter,
    pub axis_y_mouse_tracking_format: Formatter,
    pub axis_y_mouse_tracking_volume_format: Formatter,
    pub axis_x_mouse_tracking_format: Formatter,
}

impl Default for AxisFormats {
    fn default() -> Self {
        AxisFormats {
            axis_y_format: Arc::new(format_price),
            axis_y_volume_format: Arc::new(format_volume),
            axis_x_format: Arc::new(|t: f64| format_epoch_sec_f64(t, TimeUtils::AXIS_DATE_FORMAT)),
            axis_y_mouse_tracking_format: Arc::new(format_price),
            axis_y_mouse_tracking_volume_format: Arc::new(format_volume),
            axis_x_mouse_tracking_format: Arc::new(|t: f64| {
                format_epoch_sec_f64(t, TimeUtils::TRACKING_TIME_FORMAT)
            }),
        }
    }
}

impl fmt::Debug for AxisFormats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisFormats").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_format_each_axis() {
        let formats = AxisFormats::default();
        assert_eq!((formats.axis_y_format)(12.3456), "12.35");
        assert_eq!((formats.axis_y_volume_format)(1234.0), "1.23k");
        assert_eq!((formats.axis_x_format)(1_700_000_000.0), "23-11-14");
        assert_eq!(
            (formats.axis_x_mouse_tracking_format)(1_700_000_000.0),
            "2023-11-14 22:13"
        );
    }
}
