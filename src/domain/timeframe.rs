use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::utils::TimeUtils;
use crate::utils::time_utils::{now_as_timestamp_sec, utc_midnight_sec};

/// History always starts here, whatever the bucket size
const HISTORY_START: (i32, u32, u32) = (2022, 1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Default)]
pub enum Timeframe {
    Month,
    Week,
    #[default]
    Day,
}

impl Timeframe {
    /// Bucket size sent to the exchange, in seconds
    pub fn interval_sec(&self) -> i64 {
        match self {
            Timeframe::Month => TimeUtils::S_IN_1_M,
            Timeframe::Week => TimeUtils::S_IN_W,
            Timeframe::Day => TimeUtils::S_IN_D,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Month => "1 month",
            Timeframe::Week => "1 week",
            Timeframe::Day => "1 day",
        }
    }

    pub fn start_time(&self) -> i64 {
        let (year, month, day) = HISTORY_START;
        utc_midnight_sec(year, month, day).unwrap_or_default()
    }

    pub fn end_time(&self) -> i64 {
        now_as_timestamp_sec()
    }
}
