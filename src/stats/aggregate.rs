// Outcome aggregation — means and bucketed distributions of cascade sizes.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Default bucket boundaries for cascade-size distributions.
pub const DEFAULT_BOUNDARIES: [usize; 10] = [1, 2, 3, 4, 5, 10, 15, 20, 100, 1000];

/// Arithmetic mean of the outcomes.
///
/// # Errors
///
/// [`ModelError::EmptyInput`] when `outcomes` is empty.
pub fn average_outcome(outcomes: &[usize]) -> Result<f64, ModelError> {
    if outcomes.is_empty() {
        return Err(ModelError::EmptyInput);
    }
    let total: f64 = outcomes.iter().map(|&o| o as f64).sum();
    Ok(total / outcomes.len() as f64)
}

/// Check that boundaries are strictly ascending.
pub fn validate_boundaries(boundaries: &[usize]) -> Result<(), ModelError> {
    match boundaries.windows(2).position(|w| w[0] >= w[1]) {
        Some(i) => Err(ModelError::UnorderedBoundaries { index: i + 1 }),
        None => Ok(()),
    }
}

/// Count outcomes into `boundaries.len() + 1` half-open buckets:
/// `[0, b1), [b1, b2), ..., [bk, inf)`.
///
/// A value equal to a boundary lands in the bucket that boundary opens.
///
/// # Errors
///
/// [`ModelError::UnorderedBoundaries`] if the boundaries are not strictly
/// ascending.
pub fn bucket_distribution(outcomes: &[usize], boundaries: &[usize]) -> Result<Vec<usize>, ModelError> {
    validate_boundaries(boundaries)?;

    let mut counts = vec![0; boundaries.len() + 1];
    for &outcome in outcomes {
        let bucket = boundaries
            .iter()
            .position(|&b| outcome < b)
            .unwrap_or(boundaries.len());
        counts[bucket] += 1;
    }
    Ok(counts)
}

/// Human-readable labels for the buckets produced by [`bucket_distribution`].
pub fn bucket_labels(boundaries: &[usize]) -> Vec<String> {
    let mut labels = Vec::with_capacity(boundaries.len() + 1);
    let mut lower: Option<usize> = None;
    for &b in boundaries {
        labels.push(match lower {
            None => format!("< {b}"),
            Some(l) if b == l + 1 => format!("{l}"),
            Some(l) => format!("{l}-{}", b - 1),
        });
        lower = Some(b);
    }
    labels.push(match lower {
        Some(l) => format!(">= {l}"),
        None => "all".to_string(),
    });
    labels
}

/// Summary of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub cascades: usize,
    pub mean: f64,
    pub min: usize,
    pub max: usize,
    /// Cascades where the seed posted at all (outcome > 0)
    pub triggered: usize,
}

impl Summary {
    /// # Errors
    ///
    /// [`ModelError::EmptyInput`] when `outcomes` is empty.
    pub fn from_outcomes(outcomes: &[usize]) -> Result<Self, ModelError> {
        let mean = average_outcome(outcomes)?;
        Ok(Self {
            cascades: outcomes.len(),
            mean,
            min: outcomes.iter().copied().min().unwrap_or(0),
            max: outcomes.iter().copied().max().unwrap_or(0),
            triggered: outcomes.iter().filter(|&&o| o > 0).count(),
        })
    }

    /// Fraction of cascades that started (0.0-1.0).
    pub fn trigger_rate(&self) -> f64 {
        self.triggered as f64 / self.cascades as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        let avg = average_outcome(&[0, 2, 4]).unwrap();
        assert!((avg - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_empty_is_error() {
        assert_eq!(average_outcome(&[]), Err(ModelError::EmptyInput));
    }

    #[test]
    fn test_boundary_values_open_their_bucket() {
        let outcomes = [0, 1, 2, 3, 4, 5, 10, 15, 20, 100, 1000];
        let counts = bucket_distribution(&outcomes, &DEFAULT_BOUNDARIES).unwrap();
        assert_eq!(counts, vec![1; 11]);
    }

    #[test]
    fn test_values_between_boundaries() {
        let counts = bucket_distribution(&[6, 9, 11, 5000], &[5, 10]).unwrap();
        assert_eq!(counts, vec![0, 2, 2]);
    }

    #[test]
    fn test_no_boundaries_is_single_bucket() {
        assert_eq!(bucket_distribution(&[1, 2, 3], &[]).unwrap(), vec![3]);
    }

    #[test]
    fn test_unordered_boundaries_rejected() {
        assert_eq!(
            bucket_distribution(&[1], &[1, 5, 5]),
            Err(ModelError::UnorderedBoundaries { index: 2 })
        );
        assert_eq!(
            bucket_distribution(&[1], &[3, 2]),
            Err(ModelError::UnorderedBoundaries { index: 1 })
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            bucket_labels(&[1, 2, 5]),
            vec!["< 1", "1", "2-4", ">= 5"]
        );
    }

    #[test]
    fn test_summary() {
        let summary = Summary::from_outcomes(&[0, 0, 3, 7]).unwrap();
        assert_eq!(summary.cascades, 4);
        assert_eq!(summary.triggered, 2);
        assert_eq!(summary.max, 7);
        assert_eq!(summary.min, 0);
        assert!((summary.mean - 2.5).abs() < f64::EPSILON);
        assert!((summary.trigger_rate() - 0.5).abs() < f64::EPSILON);
    }
}
