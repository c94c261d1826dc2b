// Markdown report generation for simulation runs.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::BuildReport;
use crate::pipeline::simulate::RunReport;
use crate::simulation::SimulationMode;

/// Render a run as Markdown.
pub fn render_report(run: &RunReport, build: &BuildReport) -> String {
    let mut out = String::new();
    let params = &run.parameters;
    let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");

    // Writing to a String cannot fail
    let _ = writeln!(out, "# Cascade Simulation Report\n");
    let _ = writeln!(out, "Generated {generated}\n");

    let _ = writeln!(out, "## Model\n");
    let _ = writeln!(out, "| | |\n|---|---|");
    let _ = writeln!(out, "| Users | {} |", build.users);
    let _ = writeln!(out, "| Interaction edges | {} |", build.interactions);
    let _ = writeln!(out, "| Duplicate users | {} |", build.duplicate_users);
    let _ = writeln!(
        out,
        "| Duplicate interactions | {} |",
        build.duplicate_interactions
    );
    let _ = writeln!(
        out,
        "| Dropped interactions | {} |\n",
        build.dangling_interactions
    );

    let mode = match params.mode {
        SimulationMode::Exhaustive => "exhaustive".to_string(),
        SimulationMode::Sampled { rounds } => format!("sampled ({rounds} rounds)"),
    };
    let _ = writeln!(out, "## Parameters\n");
    let _ = writeln!(out, "- Average retweet rate: {}", params.avg_retweet_rate);
    let _ = writeln!(out, "- Max depth: {}", params.max_depth);
    let _ = writeln!(out, "- Mode: {mode}");
    let _ = writeln!(out, "- Seed: `{}`\n", run.seed);

    let summary = &run.summary;
    let _ = writeln!(out, "## Results\n");
    let _ = writeln!(out, "- Cascades: {}", summary.cascades);
    let _ = writeln!(
        out,
        "- Triggered: {} ({:.1}%)",
        summary.triggered,
        summary.trigger_rate() * 100.0
    );
    let _ = writeln!(out, "- Average cascade size: **{:.4}**", summary.mean);
    let _ = writeln!(out, "- Largest cascade: {}\n", summary.max);

    let _ = writeln!(out, "### Distribution\n");
    let _ = writeln!(out, "| Size | Cascades |\n|---|---|");
    for (label, count) in run.bucket_labels.iter().zip(&run.bucket_counts) {
        let _ = writeln!(out, "| {label} | {count} |");
    }

    out
}

/// Write the report to `path`, creating parent directories. Returns the path written.
pub fn generate_report(run: &RunReport, build: &BuildReport, path: &str) -> Result<String> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, render_report(run, build))
        .with_context(|| format!("Failed to write report to {path}"))?;
    Ok(path.to_string())
}
