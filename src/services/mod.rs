pub mod cost;
pub mod deadline;
pub mod forecast;
pub mod forecast_types;
pub mod histogram;
pub mod percentiles;
pub mod request_yaml;
pub mod risk_sampler;
pub mod simulation;
pub mod trend;
