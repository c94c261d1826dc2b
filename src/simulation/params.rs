// Simulation parameters.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// How seeds are chosen for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// One cascade per registered user, in registry order
    Exhaustive,
    /// `rounds` seeds drawn uniformly, with replacement, from the candidate pool
    Sampled { rounds: usize },
}

/// Immutable configuration for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Baseline probability that an average user retweets (0.0-1.0)
    pub avg_retweet_rate: f64,
    /// Deepest follower layer a cascade may reach; the seed sits at depth 0
    pub max_depth: usize,
    pub mode: SimulationMode,
}

impl SimulationParameters {
    pub fn exhaustive(avg_retweet_rate: f64, max_depth: usize) -> Self {
        Self {
            avg_retweet_rate,
            max_depth,
            mode: SimulationMode::Exhaustive,
        }
    }

    pub fn sampled(avg_retweet_rate: f64, max_depth: usize, rounds: usize) -> Self {
        Self {
            avg_retweet_rate,
            max_depth,
            mode: SimulationMode::Sampled { rounds },
        }
    }

    /// Reject parameters the simulator cannot honor.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParameters`] for a rate outside 0.0-1.0 (or NaN)
    /// and for a sampled run with zero rounds.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(0.0..=1.0).contains(&self.avg_retweet_rate) {
            return Err(ModelError::InvalidParameters(format!(
                "avg_retweet_rate must be within 0.0-1.0, got {}",
                self.avg_retweet_rate
            )));
        }
        if let SimulationMode::Sampled { rounds: 0 } = self.mode {
            return Err(ModelError::InvalidParameters(
                "sampled mode needs at least one round".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters() {
        assert!(SimulationParameters::exhaustive(0.0, 0).validate().is_ok());
        assert!(SimulationParameters::sampled(1.0, 5, 1).validate().is_ok());
    }

    #[test]
    fn test_rate_out_of_range() {
        assert!(SimulationParameters::exhaustive(1.5, 3).validate().is_err());
        assert!(SimulationParameters::exhaustive(-0.1, 3).validate().is_err());
        assert!(SimulationParameters::exhaustive(f64::NAN, 3)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = SimulationParameters::sampled(0.5, 3, 0).validate().unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameters(_)));
    }
}
