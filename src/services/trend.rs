use thiserror::Error;

use crate::domain::throughput::{ThroughputHistory, TREND_SAMPLE_COUNT};

#[derive(Error, Debug, PartialEq)]
pub enum TrendError {
    #[error("{samples} samples, {required} required")]
    InsufficientHistory { samples: usize, required: usize },
    #[error("fitted throughput trend never completes the backlog")]
    DegenerateTrend,
}

/// Trend-fitted point estimate of periods to completion, used only to
/// cross-validate the Monte Carlo percentiles.
///
/// An ordinary least-squares line is fitted to throughput over the period
/// index and projected past the end of the history; projected throughput is
/// clamped at zero and accumulated until the backlog is exhausted.
pub fn trend_estimate(history: &ThroughputHistory, backlog: u32) -> Result<f32, TrendError> {
    let samples = history.samples();
    if !history.supports_trend_estimate() {
        return Err(TrendError::InsufficientHistory {
            samples: samples.len(),
            required: TREND_SAMPLE_COUNT,
        });
    }
    if backlog == 0 {
        return Ok(0.0);
    }

    let (slope, intercept) = fit_line(samples);

    let mut remaining = backlog as f64;
    let mut periods: u32 = 0;
    let mut x = samples.len() as f64;
    while remaining > 0.0 {
        let predicted = (intercept + slope * x).max(0.0);
        if predicted <= 0.0 && slope <= 0.0 {
            return Err(TrendError::DegenerateTrend);
        }
        periods += 1;
        remaining -= predicted;
        x += 1.0;
    }

    Ok(periods as f32)
}

fn fit_line(samples: &[u32]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = samples.iter().map(|value| *value as f64).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (index, value) in samples.iter().enumerate() {
        let dx = index as f64 - mean_x;
        numerator += dx * (*value as f64 - mean_y);
        denominator += dx * dx;
    }

    let slope = if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        numerator / denominator
    };
    (slope, mean_y - slope * mean_x)
}
