use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RiskValidationError {
    #[error("risk probability {0} is outside the 0-100 range")]
    ProbabilityOutOfRange(f64),
    #[error("risk impact values must be positive item counts")]
    NonPositiveImpact,
    #[error("risk impact values must satisfy optimistic <= most_likely <= pessimistic")]
    UnorderedImpact,
}

/// A probabilistic scope-risk: a Bernoulli trigger plus a triangular
/// impact distribution in added work items.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskEvent {
    /// Trigger probability in [0, 1].
    pub probability: f64,
    pub optimistic: u32,
    pub most_likely: u32,
    pub pessimistic: u32,
}

impl RiskEvent {
    /// Builds a risk from the interface form: probability as a percentage
    /// in [0, 100] and three impact values in items.
    pub fn from_percent(
        percent: f64,
        optimistic: u32,
        most_likely: u32,
        pessimistic: u32,
    ) -> Result<Self, RiskValidationError> {
        if !(0.0..=100.0).contains(&percent) || percent.is_nan() {
            return Err(RiskValidationError::ProbabilityOutOfRange(percent));
        }
        if optimistic == 0 {
            return Err(RiskValidationError::NonPositiveImpact);
        }
        if optimistic > most_likely || most_likely > pessimistic {
            return Err(RiskValidationError::UnorderedImpact);
        }

        Ok(Self {
            probability: percent / 100.0,
            optimistic,
            most_likely,
            pessimistic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_percent_scales_probability() {
        let risk = RiskEvent::from_percent(30.0, 5, 10, 20).unwrap();
        assert!((risk.probability - 0.3).abs() < f64::EPSILON);
        assert_eq!(risk.optimistic, 5);
        assert_eq!(risk.pessimistic, 20);
    }

    #[test]
    fn from_percent_rejects_probability_above_100() {
        let error = RiskEvent::from_percent(130.0, 5, 10, 20).unwrap_err();
        assert_eq!(error, RiskValidationError::ProbabilityOutOfRange(130.0));
    }

    #[test]
    fn from_percent_rejects_negative_probability() {
        let error = RiskEvent::from_percent(-1.0, 5, 10, 20).unwrap_err();
        assert_eq!(error, RiskValidationError::ProbabilityOutOfRange(-1.0));
    }

    #[test]
    fn from_percent_rejects_zero_optimistic_impact() {
        let error = RiskEvent::from_percent(50.0, 0, 10, 20).unwrap_err();
        assert_eq!(error, RiskValidationError::NonPositiveImpact);
    }

    #[test]
    fn from_percent_rejects_unordered_impacts() {
        let error = RiskEvent::from_percent(50.0, 5, 25, 20).unwrap_err();
        assert_eq!(error, RiskValidationError::UnorderedImpact);

        let error = RiskEvent::from_percent(50.0, 15, 10, 20).unwrap_err();
        assert_eq!(error, RiskValidationError::UnorderedImpact);
    }

    #[test]
    fn from_percent_accepts_degenerate_impact() {
        let risk = RiskEvent::from_percent(100.0, 4, 4, 4).unwrap();
        assert_eq!(risk.probability, 1.0);
        assert_eq!(risk.most_likely, 4);
    }
}
