use chrono::{DateTime, TimeZone, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const S_IN_MIN: i64 = 60;
    pub const S_IN_H: i64 = Self::S_IN_MIN * 60;
    pub const S_IN_D: i64 = Self::S_IN_H * 24;
    pub const S_IN_W: i64 = Self::S_IN_D * 7;
    pub const S_IN_1_M: i64 = Self::S_IN_D * 30;

    /// Axis-X tick labels
    pub const AXIS_DATE_FORMAT: &str = "%y-%m-%d";
    /// Crosshair readout under the plot
    pub const TRACKING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
    /// Signal tooltip rows
    pub const TOOLTIP_TIME_FORMAT: &str = "%Y-%m-%d, %H:%M";

    /// Convert an interval in seconds to an exchange-style shorthand (e.g. `1d`, `1w`).
    pub fn interval_to_string(interval_sec: i64) -> &'static str {
        match interval_sec {
            Self::S_IN_MIN => "1m",
            Self::S_IN_H => "1h",
            Self::S_IN_D => "1d",
            Self::S_IN_W => "1w",
            Self::S_IN_1_M => "1M",
            _ => "unknown",
        }
    }
}

/// Format a unix timestamp (seconds, UTC). Out-of-range values give an empty string.
pub fn format_epoch_sec(epoch_sec: i64, format: &str) -> String {
    if let chrono::LocalResult::Single(datetime) = Utc.timestamp_opt(epoch_sec, 0) {
        datetime.format(format).to_string()
    } else {
        String::new()
    }
}

/// Chart scales work in `f64`; inverted pixels land between whole seconds.
pub fn format_epoch_sec_f64(epoch_sec: f64, format: &str) -> String {
    if !epoch_sec.is_finite() {
        return String::new();
    }
    format_epoch_sec(epoch_sec.round() as i64, format)
}

pub fn now_as_timestamp_sec() -> i64 {
    Utc::now().timestamp()
}

/// Midnight UTC of the given calendar day, as unix seconds
pub fn utc_midnight_sec(year: i32, month: u32, day: u32) -> Option<i64> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .map(|dt: DateTime<Utc>| dt.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_timestamp() {
        assert_eq!(
            format_epoch_sec(1_700_000_000, TimeUtils::TRACKING_TIME_FORMAT),
            "2023-11-14 22:13"
        );
        assert_eq!(
            format_epoch_sec(1_700_000_000, TimeUtils::AXIS_DATE_FORMAT),
            "23-11-14"
        );
    }

    #[test]
    fn fractional_seconds_are_rounded() {
        assert_eq!(
            format_epoch_sec_f64(1_700_000_000.4, TimeUtils::TRACKING_TIME_FORMAT),
            "2023-11-14 22:13"
        );
        assert_eq!(format_epoch_sec_f64(f64::NAN, TimeUtils::AXIS_DATE_FORMAT), "");
    }

    #[test]
    fn start_of_2022() {
        assert_eq!(utc_midnight_sec(2022, 1, 1), Some(1_640_995_200));
    }

    #[test]
    fn interval_names() {
        assert_eq!(TimeUtils::interval_to_string(86_400), "1d");
        assert_eq!(TimeUtils::interval_to_string(604_800), "1w");
        assert_eq!(TimeUtils::interval_to_string(2_592_000), "1M");
        assert_eq!(TimeUtils::interval_to_string(17), "unknown");
    }
}
