use crate::services::forecast_types::PercentileSet;

/// Percentile extraction over an ascending slice of trial results.
///
/// Interpolation rule, applied consistently everywhere: the position
/// `p/100 * (len-1)` is rounded to the nearest index. `p <= 0` clamps to
/// the first element and `p >= 100` to the last. The rule is monotonic in
/// `p`, so P50 <= P85 <= P95 holds for any input.
pub fn value_from_sorted(sorted_values: &[f32], percentile: f64) -> f32 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let index = if percentile <= 0.0 {
        0
    } else if percentile >= 100.0 {
        sorted_values.len() - 1
    } else {
        let position = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
        position.round() as usize
    };

    sorted_values[index]
}

/// The forecast percentile set (P50/P85/P95) of a sorted trial population.
pub fn forecast_percentiles(sorted_values: &[f32]) -> PercentileSet {
    PercentileSet {
        p50: value_from_sorted(sorted_values, 50.0),
        p85: value_from_sorted(sorted_values, 85.0),
        p95: value_from_sorted(sorted_values, 95.0),
    }
}
