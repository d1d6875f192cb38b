//! Chart geometry engine: scales, layout, draw passes and pointer overlays.
//! Backend independent; output is a `Scene` of primitives.

pub mod axis;
pub mod candles;
pub mod candlestick;
pub mod error;
pub mod formats;
pub mod layout;
pub mod scale;
pub mod scene;
pub mod signals;
pub mod tooltip;
pub mod tracking;

pub use axis::{MonospaceMeasure, TextMeasure};
pub use candlestick::{CandlestickChart, ChartHandle, ChartInstance, ChartWidth};
pub use error::ChartError;
pub use formats::{AxisFormats, Formatter};
pub use scale::LinearScale;
pub use scene::{Primitive, Scene};
pub use signals::PointerEvent;
pub use tooltip::{Tooltip, TooltipTemplate, signal_template};
pub use tracking::OverlayState;
