use argminmax::ArgMinMax;

/// Index of the largest value in `vec[from..]`, reported in `vec` coordinates.
/// None when that sub-slice is empty.
#[inline]
pub(crate) fn argmax_from(vec: &[f64], from: usize) -> Option<usize> {
    let tail = vec.get(from..)?;
    if tail.is_empty() {
        return None;
    }
    Some(from + tail.argmax())
}

/// max - min of a slice. 0.0 for an empty slice.
#[inline]
pub(crate) fn value_range(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return 0.0;
    }
    let (min_index, max_index) = vec.argminmax();
    vec[max_index] - vec[min_index]
}

/// Truncates (never rounds) toward zero at `decimals` places.
#[inline]
pub(crate) fn truncate_decimals(val: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (val * factor).trunc() / factor
}

/// Sum of squares.
#[inline]
pub(crate) fn energy(data: &[f64]) -> f64 {
    data.iter().map(|v| v * v).sum()
}

/// Linearly maps a value from one range to another while preserving its relative proportion.
pub fn remap(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = (val - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}
