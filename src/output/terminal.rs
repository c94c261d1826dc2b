// Colored terminal output for run reports, sweeps and model diagnostics.
//
// This module handles all terminal-specific formatting. The main.rs
// command handlers delegate here.

use colored::Colorize;

use super::bar;
use crate::model::{BuildReport, Model};
use crate::pipeline::simulate::RunReport;
use crate::pipeline::sweep::SweepPoint;
use crate::simulation::SimulationMode;
use crate::stats::{CoActionHistogram, Histogram};

/// Display what ingestion produced, including recovered data problems.
pub fn display_build_report(report: &BuildReport) {
    println!(
        "Loaded {} users and {} interaction edges",
        report.users, report.interactions
    );
    if report.duplicate_users > 0 {
        println!(
            "  {} {} duplicate users (later values kept)",
            "Warning:".yellow(),
            report.duplicate_users
        );
    }
    if report.duplicate_interactions > 0 {
        println!(
            "  {} {} duplicate interaction pairs (later values kept)",
            "Warning:".yellow(),
            report.duplicate_interactions
        );
    }
    if report.dangling_interactions > 0 {
        println!(
            "  {} interactions dropped (origin not in activity data)",
            report.dangling_interactions.to_string().dimmed()
        );
    }
}

/// Display the summary and cascade-size distribution of one run.
pub fn display_run_report(report: &RunReport) {
    let params = &report.parameters;
    let mode = match params.mode {
        SimulationMode::Exhaustive => "exhaustive".to_string(),
        SimulationMode::Sampled { rounds } => format!("sampled, {rounds} rounds"),
    };

    println!("\n{}", "=== Simulation Results ===".bold());
    println!(
        "  Rate: {}  Max depth: {}  Mode: {}  Seed: {}",
        params.avg_retweet_rate,
        params.max_depth,
        mode,
        report.seed.to_string().dimmed()
    );
    println!();

    let summary = &report.summary;
    println!("  Cascades run:        {}", summary.cascades);
    println!(
        "  Triggered:           {} ({:.1}%)",
        summary.triggered,
        summary.trigger_rate() * 100.0
    );
    println!(
        "  Average cascade:     {}",
        format!("{:.4}", summary.mean).bold()
    );
    println!("  Largest cascade:     {}", summary.max);

    println!("\n  {}", "Cascade size distribution".bold());
    let peak = report.bucket_counts.iter().copied().max().unwrap_or(0);
    for (label, &count) in report.bucket_labels.iter().zip(&report.bucket_counts) {
        println!(
            "  {:>10}  {:>8}  {}",
            label,
            count,
            bar(count, peak, 40).cyan()
        );
    }
}

/// Display a sweep as a rate x depth table of mean cascade sizes.
pub fn display_sweep(points: &[SweepPoint]) {
    if points.is_empty() {
        println!("No sweep points to display.");
        return;
    }

    let mut depths: Vec<usize> = points.iter().map(|p| p.max_depth).collect();
    depths.sort_unstable();
    depths.dedup();

    println!("\n{}", "=== Mean Cascade Size by Rate and Depth ===".bold());
    print!("  {:>8}", "rate".dimmed());
    for depth in &depths {
        print!("  {:>10}", format!("depth {depth}").dimmed());
    }
    println!();
    println!("  {}", "-".repeat(8 + depths.len() * 12).dimmed());

    let mut current_rate: Option<f64> = None;
    for point in points {
        if current_rate != Some(point.avg_retweet_rate) {
            if current_rate.is_some() {
                println!();
            }
            print!("  {:>8}", point.avg_retweet_rate);
            current_rate = Some(point.avg_retweet_rate);
        }
        print!("  {:>10.4}", point.summary.mean);
    }
    println!();
}

/// Display the model's size and its population histograms.
pub fn display_model_overview(
    model: &Model,
    engagement: &Histogram<f64>,
    followers: &Histogram<usize>,
    co_action: &CoActionHistogram,
) {
    let registry = model.registry();
    let isolated = registry
        .users()
        .filter(|(_, u)| u.followers.is_empty())
        .count();

    println!("\n{}", "=== Spread Model ===".bold());
    println!("  Users:              {}", registry.len());
    println!(
        "  Interaction edges:  {}",
        model.interactions().edge_count()
    );
    println!(
        "  Active reposters:   {}",
        model.interactions().reposter_count()
    );
    println!("  Users w/o followers: {}", isolated);

    println!("\n  {}", "Engagement factor".bold());
    let peak = engagement.counts.iter().copied().max().unwrap_or(0);
    for (i, &count) in engagement.counts.iter().enumerate() {
        println!(
            "  [{:>8.3}, {:>8.3})  {:>8}  {}",
            engagement.lower_edge(i),
            engagement.lower_edge(i + 1),
            count,
            bar(count, peak, 40).cyan()
        );
    }

    println!("\n  {}", "Follower count".bold());
    let peak = followers.counts.iter().copied().max().unwrap_or(0);
    for (i, &count) in followers.counts.iter().enumerate() {
        println!(
            "  [{:>8}, {:>8})  {:>8}  {}",
            followers.lower_edge(i),
            followers.lower_edge(i + 1),
            count,
            bar(count, peak, 40).cyan()
        );
    }

    println!("\n  {}", "Co-action ratio".bold());
    println!("  Reciprocal edges:   {}", co_action.reciprocal());
    println!("  One-sided edges:    {}", co_action.one_sided);
    // Ratios span orders of magnitude, so only occupied buckets are listed
    let ratios = &co_action.ratios;
    let peak = ratios.counts.iter().copied().max().unwrap_or(0);
    for (i, &count) in ratios.counts.iter().enumerate().filter(|&(_, &c)| c > 0) {
        println!(
            "  [{:>8.3}, {:>8.3})  {:>8}  {}",
            ratios.lower_edge(i),
            ratios.lower_edge(i + 1),
            count,
            bar(count, peak, 40).cyan()
        );
    }
}
