// Parameter sweep: mean cascade size across a grid of rates and depths.
//
// Each grid cell is an independent run against the same model. All cells
// draw from one generator, so the whole sweep is reproducible from a single
// seed.

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::model::Model;
use crate::simulation::{RandomSource, SimulationMode, SimulationParameters, Simulator};
use crate::stats::aggregate::Summary;

/// One (rate, depth) cell of a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub avg_retweet_rate: f64,
    pub max_depth: usize,
    pub summary: Summary,
}

/// Run every combination of `rates` x `depths`, rates varying slowest.
pub fn run<R: RandomSource>(
    model: &Model,
    source: R,
    rates: &[f64],
    depths: &[usize],
    mode: SimulationMode,
    show_progress: bool,
) -> Result<Vec<SweepPoint>> {
    if rates.is_empty() || depths.is_empty() {
        bail!("A sweep needs at least one rate and one depth");
    }

    let pb = if show_progress {
        let pb = ProgressBar::new((rates.len() * depths.len()) as u64);
        pb.set_style(ProgressStyle::default_bar().template("  Sweep [{bar:30}] {pos}/{len} ({eta})")?);
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut simulator = Simulator::new(model, source);
    let mut points = Vec::with_capacity(rates.len() * depths.len());

    for &rate in rates {
        for &depth in depths {
            let params = SimulationParameters {
                avg_retweet_rate: rate,
                max_depth: depth,
                mode,
            };
            let outcomes = simulator.run(&params)?;
            let summary = Summary::from_outcomes(&outcomes)?;
            info!(rate, depth, mean = summary.mean, "Sweep point done");
            points.push(SweepPoint {
                avg_retweet_rate: rate,
                max_depth: depth,
                summary,
            });
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    Ok(points)
}
