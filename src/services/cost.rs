use crate::services::forecast_types::PercentileSet;

/// `cost = periods * team size * cost per person per period`.
pub fn cost(periods: f32, team_size: u32, rate: f32) -> f32 {
    periods * team_size as f32 * rate
}

/// Cost percentiles derived directly from the period percentiles. The
/// scaling is linear and team size is constant across a run, which makes
/// this equivalent to costing every trial and re-extracting percentiles.
pub fn cost_percentiles(periods: &PercentileSet, team_size: u32, rate: f32) -> PercentileSet {
    PercentileSet {
        p50: cost(periods.p50, team_size, rate),
        p85: cost(periods.p85, team_size, rate),
        p95: cost(periods.p95, team_size, rate),
    }
}
