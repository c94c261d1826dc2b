// Model diagnostics — fixed-width histograms over users and interaction edges.
//
// Buckets start at the smallest observed value and are `resolution` wide,
// half-open on the right: `[min, min + r), [min + r, min + 2r), ...`.
// There are always enough buckets to hold the largest observed value.

use serde::Serialize;

use crate::error::ModelError;
use crate::model::Model;

/// Fixed-width histogram; bucket `i` covers `[start + i * width, start + (i + 1) * width)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram<T> {
    pub start: T,
    pub width: T,
    pub counts: Vec<usize>,
}

impl<T: Copy> Histogram<T> {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Histogram<f64> {
    /// Lower edge of bucket `i`.
    pub fn lower_edge(&self, i: usize) -> f64 {
        self.start + i as f64 * self.width
    }
}

impl Histogram<usize> {
    pub fn lower_edge(&self, i: usize) -> usize {
        self.start + i * self.width
    }
}

/// Upper bound on the bucket count of any histogram.
pub const MAX_HISTOGRAM_BUCKETS: usize = 100_000;

/// Co-action ratios over every directed interaction edge.
///
/// For an edge where `a` reposts `b`, the ratio is how often `a` reposts
/// `b` divided by how often `b` reposts `a`. Edges without a reverse
/// edge, or whose reverse count is zero, have no ratio and are only
/// counted in `one_sided`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoActionHistogram {
    pub ratios: Histogram<f64>,
    pub one_sided: usize,
}

impl CoActionHistogram {
    /// Number of edges with a reciprocal partner.
    pub fn reciprocal(&self) -> usize {
        self.ratios.total()
    }
}

fn check_float_resolution(what: &str, resolution: f64) -> Result<(), ModelError> {
    if resolution.is_finite() && resolution > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidResolution(format!(
            "{what} resolution must be a positive number, got {resolution}"
        )))
    }
}

/// Bucket non-empty `values` from their minimum in steps of `resolution`.
fn bucket_floats(what: &str, values: &[f64], resolution: f64) -> Result<Histogram<f64>, ModelError> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let span = ((max - min) / resolution).floor();
    if !span.is_finite() || span >= MAX_HISTOGRAM_BUCKETS as f64 {
        return Err(ModelError::InvalidResolution(format!(
            "{what} resolution {resolution} is too fine for the range {min}..{max} \
             (at most {MAX_HISTOGRAM_BUCKETS} buckets)"
        )));
    }
    let buckets = span as usize + 1;

    let mut counts = vec![0; buckets];
    for &v in values {
        // Clamp guards against float rounding at the top edge
        let i = (((v - min) / resolution).floor() as usize).min(buckets - 1);
        counts[i] += 1;
    }

    Ok(Histogram {
        start: min,
        width: resolution,
        counts,
    })
}

/// Distribution of engagement factors across all registered users.
///
/// # Errors
///
/// [`ModelError::InvalidResolution`] for a non-positive or non-finite
/// width, or one so fine the range would need more than
/// [`MAX_HISTOGRAM_BUCKETS`] buckets.
pub fn engagement_histogram(model: &Model, resolution: f64) -> Result<Histogram<f64>, ModelError> {
    check_float_resolution("engagement", resolution)?;
    let values: Vec<f64> = model
        .registry()
        .users()
        .map(|(_, u)| u.engagement_factor)
        .collect();
    if values.is_empty() {
        return Err(ModelError::EmptyModel);
    }
    bucket_floats("engagement", &values, resolution)
}

/// Distribution of co-action ratios across all interaction edges.
///
/// With no reciprocal edges at all, `ratios` has no buckets and starts at 0.
///
/// # Errors
///
/// [`ModelError::InvalidResolution`] under the same rules as
/// [`engagement_histogram`].
pub fn co_action_histogram(model: &Model, resolution: f64) -> Result<CoActionHistogram, ModelError> {
    check_float_resolution("co-action", resolution)?;
    let graph = model.interactions();

    let mut ratios = Vec::new();
    let mut one_sided = 0;
    for reposter in graph.reposters() {
        for (origin, interaction) in graph.origins_of(reposter) {
            // `origin` reposting `reposter` is the reverse edge
            match graph.retweet_count(reposter, origin) {
                0 => one_sided += 1,
                reverse => ratios.push(interaction.retweet_count as f64 / reverse as f64),
            }
        }
    }

    let ratios = if ratios.is_empty() {
        Histogram {
            start: 0.0,
            width: resolution,
            counts: Vec::new(),
        }
    } else {
        bucket_floats("co-action", &ratios, resolution)?
    };
    Ok(CoActionHistogram { ratios, one_sided })
}

/// Distribution of follower counts across all registered users.
///
/// # Errors
///
/// [`ModelError::InvalidResolution`] for a zero width, or one that would
/// need more than [`MAX_HISTOGRAM_BUCKETS`] buckets.
pub fn follower_histogram(model: &Model, resolution: usize) -> Result<Histogram<usize>, ModelError> {
    if resolution == 0 {
        return Err(ModelError::InvalidResolution(
            "follower resolution must be at least 1".to_string(),
        ));
    }
    let values: Vec<usize> = model
        .registry()
        .users()
        .map(|(_, u)| u.followers.len())
        .collect();
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Err(ModelError::EmptyModel);
    };

    let buckets = (max - min) / resolution + 1;
    if buckets > MAX_HISTOGRAM_BUCKETS {
        return Err(ModelError::InvalidResolution(format!(
            "follower resolution {resolution} is too fine for the range {min}..{max} \
             (at most {MAX_HISTOGRAM_BUCKETS} buckets)"
        )));
    }
    let mut counts = vec![0; buckets];
    for v in values {
        counts[(v - min) / resolution] += 1;
    }

    Ok(Histogram {
        start: min,
        width: resolution,
        counts,
    })
}
