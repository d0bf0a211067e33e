use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Renders the sorted trial distribution as a PNG histogram. Period
/// counts are integers, so bins are whole periods widened with the spread
/// of the distribution.
pub fn write_histogram_png(output_path: &str, sorted_results: &[f32]) -> Result<(), HistogramError> {
    if sorted_results.is_empty() {
        return Ok(());
    }

    let min_period = sorted_results[0].round() as i32;
    let max_period = sorted_results[sorted_results.len() - 1].round() as i32;
    let range = (max_period - min_period).max(0) as f32;
    let bin_width = ((range / (sorted_results.len() as f32).sqrt()).ceil() as i32).max(1);

    let mut counts: std::collections::BTreeMap<i32, usize> = std::collections::BTreeMap::new();
    for value in sorted_results {
        let bucket = (value.round() as i32 - min_period) / bin_width;
        *counts.entry(bucket).or_insert(0usize) += 1;
    }
    let max_count = *counts.values().max().unwrap_or(&1);
    let max_bucket = *counts.keys().next_back().unwrap_or(&0);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let x_max = min_period + (max_bucket + 1) * bin_width;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Forecast Distribution", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(min_period..x_max, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Periods to completion")
        .y_desc("Trials")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(counts.iter().map(|(bucket, count)| {
            let left = min_period + bucket * bin_width;
            Rectangle::new([(left, 0), (left + bin_width, *count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
