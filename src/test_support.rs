use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::request::ForecastRequest;
use crate::domain::throughput::ThroughputHistory;

pub fn history(samples: &[u32]) -> ThroughputHistory {
    ThroughputHistory::new(samples.to_vec()).unwrap()
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn base_request(backlog: u32, samples: &[u32]) -> ForecastRequest {
    ForecastRequest::new(backlog, history(samples))
}
