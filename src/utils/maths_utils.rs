use argminmax::ArgMinMax;

/// Evenly spaced sampler used for axis ticks.
/// First and last values are pinned exactly to `min_val` / `max_val`; interior values are
/// linearly interpolated. Any `count <= 2` yields exactly `[min_val, max_val]`.
pub fn generate_number_range(min_val: f64, max_val: f64, count: usize) -> Vec<f64> {
    if count <= 2 {
        return vec![min_val, max_val];
    }

    let step = (max_val - min_val) / (count - 1) as f64;
    let mut result: Vec<f64> = (0..count - 1).map(|i| min_val + step * i as f64).collect();
    // Pushed rather than computed so float error never moves the last tick off `max_val`
    result.push(max_val);
    result
}

/// `percentage` percent of `value`
pub fn calculate_percentage(value: f64, percentage: f64) -> f64 {
    (value * percentage) / 100.0
}

pub fn get_max(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let max_index: usize = vec.argmax();
    Some(vec[max_index])
}

pub fn get_min(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let min_index: usize = vec.argmin();
    Some(vec[min_index])
}

/// (min, max) of a slice, or `None` when it is empty
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    Some((get_min(vec)?, get_max(vec)?))
}
