//! Number formatting for axis labels, crosshair readouts and tooltips.

const AVERAGE_SUFFIXES: [(f64, &str); 4] = [(1e12, "t"), (1e9, "b"), (1e6, "m"), (1e3, "k")];

/// Round to at most `digits` significant digits, no digit grouping, trailing zeros trimmed.
/// `12.3456 -> "12.35"`, `43210.5 -> "43210"`, `0.000123456 -> "0.0001235"`.
pub fn format_significant(value: f64, digits: u32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let digits = digits.max(1) as i32;
    let magnitude = value.abs().log10().floor() as i32;
    let shift = digits - 1 - magnitude;
    let factor = 10f64.powi(shift);
    // Subnormals push the shift past the f64 exponent range
    if !factor.is_finite() {
        return format!("{:.*e}", (digits - 1) as usize, value);
    }
    let rounded = (value * factor).round() / factor;
    let decimals = shift.max(0) as usize;

    let text = format!("{:.*}", decimals, rounded);
    if decimals > 0 {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Abbreviated magnitude with a fixed mantissa: `1234 -> "1.23k"`, `4_560_000 -> "4.56m"`.
pub fn format_average(value: f64, mantissa: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", mantissa, 0.0);
    }

    let abs_value = value.abs();
    for (threshold, suffix) in AVERAGE_SUFFIXES {
        if abs_value >= threshold {
            return format!("{:.*}{}", mantissa, value / threshold, suffix);
        }
    }
    format!("{:.*}", mantissa, value)
}

/// Price readout used on the Y axis, in the crosshair and in tooltips
pub fn format_price(price: f64) -> String {
    format_significant(price, 4)
}

/// Volume readout used on the volume axis and in the crosshair
pub fn format_volume(volume: f64) -> String {
    format_average(volume, 2)
}
