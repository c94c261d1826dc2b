// Simulation pipeline: run cascades with a progress bar, then aggregate.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::model::Model;
use crate::simulation::{RandomSource, SimulationMode, SimulationParameters, Simulator};
use crate::stats::aggregate::{bucket_distribution, bucket_labels, validate_boundaries, Summary};

/// Everything a finished run reports.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub parameters: SimulationParameters,
    pub summary: Summary,
    pub boundaries: Vec<usize>,
    pub bucket_labels: Vec<String>,
    pub bucket_counts: Vec<usize>,
    #[serde(skip)]
    pub outcomes: Vec<usize>,
}

/// Number of cascades the parameters will run against `model`.
pub fn planned_cascades(model: &Model, params: &SimulationParameters) -> usize {
    match params.mode {
        SimulationMode::Exhaustive => model.user_count(),
        SimulationMode::Sampled { rounds } => rounds,
    }
}

/// Run a full simulation and aggregate its outcomes.
///
/// `seed` is only recorded in the report; the caller has already used it to
/// build `source`.
pub fn run<R: RandomSource>(
    model: &Model,
    source: R,
    seed: u64,
    params: &SimulationParameters,
    boundaries: &[usize],
    show_progress: bool,
) -> Result<RunReport> {
    // Fail on bad boundaries before spending time on cascades
    validate_boundaries(boundaries)?;

    let pb = if show_progress {
        let pb = ProgressBar::new(planned_cascades(model, params) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Cascades [{bar:30}] {pos}/{len} ({eta})")?,
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut simulator = Simulator::new(model, source);
    let outcomes = simulator.run_observed(params, |_| pb.inc(1))?;
    pb.finish_and_clear();

    let summary = Summary::from_outcomes(&outcomes)?;
    let bucket_counts = bucket_distribution(&outcomes, boundaries)?;

    Ok(RunReport {
        seed,
        parameters: *params,
        summary,
        boundaries: boundaries.to_vec(),
        bucket_labels: bucket_labels(boundaries),
        bucket_counts,
        outcomes,
    })
}
