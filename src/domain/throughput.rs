use thiserror::Error;

/// Minimum sample count before forecasts are considered statistically stable.
pub const STABLE_SAMPLE_COUNT: usize = 5;
/// Minimum sample count required for the trend estimate.
pub const TREND_SAMPLE_COUNT: usize = 8;

#[derive(Error, Debug, PartialEq)]
pub enum ThroughputParseError {
    #[error("throughput history is empty")]
    Empty,
    #[error("invalid throughput sample '{0}': expected a non-negative integer")]
    InvalidSample(String),
}

/// Completed work items per historical period, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThroughputHistory {
    samples: Vec<u32>,
}

impl ThroughputHistory {
    pub fn new(samples: Vec<u32>) -> Result<Self, ThroughputParseError> {
        if samples.is_empty() {
            return Err(ThroughputParseError::Empty);
        }
        Ok(Self { samples })
    }

    /// Parses the comma-separated form used by the command line,
    /// e.g. `"6,8,5,9"`. Whitespace around samples is ignored.
    pub fn parse_comma_separated(input: &str) -> Result<Self, ThroughputParseError> {
        if input.trim().is_empty() {
            return Err(ThroughputParseError::Empty);
        }

        let mut samples = Vec::new();
        for token in input.split(',') {
            let token = token.trim();
            let value = token
                .parse::<u32>()
                .map_err(|_| ThroughputParseError::InvalidSample(token.to_string()))?;
            samples.push(value);
        }
        Self::new(samples)
    }

    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn has_positive_sample(&self) -> bool {
        self.samples.iter().any(|value| *value > 0)
    }

    pub fn is_stable_sample_size(&self) -> bool {
        self.samples.len() >= STABLE_SAMPLE_COUNT
    }

    pub fn supports_trend_estimate(&self) -> bool {
        self.samples.len() >= TREND_SAMPLE_COUNT
    }
}
