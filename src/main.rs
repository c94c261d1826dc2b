use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use ripple::config::{parse_list, Config};
use ripple::model::{BuildReport, Model};
use ripple::simulation::random;
use ripple::simulation::{SimulationMode, SimulationParameters};

/// Ripple: retweet cascade simulation.
///
/// Estimates how far a message is likely to spread from historical
/// activity and retweet interaction counts.
#[derive(Parser)]
#[command(name = "ripple", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input files shared by every command.
#[derive(Args)]
struct InputArgs {
    /// Activity file (`<user_id> <avg_daily_retweets>` per line)
    #[arg(long)]
    activity: Option<PathBuf>,

    /// Interaction file (`<reposter_id> <origin_id> <retweet_count>` per line)
    #[arg(long)]
    interactions: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cascades and report the average size and distribution
    Simulate {
        #[command(flatten)]
        input: InputArgs,

        /// Average baseline retweet rate (0.0-1.0)
        #[arg(long)]
        rate: Option<f64>,

        /// Maximum cascade depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Draw this many random seeds instead of seeding from every user
        #[arg(long)]
        rounds: Option<usize>,

        /// Seed every user once, even if RIPPLE_ROUNDS is set
        #[arg(long, conflicts_with = "rounds")]
        exhaustive: bool,

        /// Random seed (a fresh one is drawn and printed if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Comma-separated, strictly ascending bucket boundaries
        #[arg(long)]
        buckets: Option<String>,

        /// Print the results as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write a Markdown report to this path
        #[arg(long)]
        report: Option<String>,
    },

    /// Sweep a grid of retweet rates and depths, reporting mean cascade sizes
    Sweep {
        #[command(flatten)]
        input: InputArgs,

        /// Comma-separated retweet rates
        #[arg(long, default_value = "0.01,0.05,0.1,0.2,0.5")]
        rates: String,

        /// Comma-separated max depths
        #[arg(long, default_value = "1,2,3,5")]
        depths: String,

        /// Random seeds per grid cell (seeds every user once if omitted)
        #[arg(long)]
        rounds: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Show model size and engagement, follower-count and co-action histograms
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Engagement factor bucket width
        #[arg(long, default_value = "0.25")]
        engagement_resolution: f64,

        /// Follower count bucket width
        #[arg(long, default_value = "1")]
        follower_resolution: usize,

        /// Co-action ratio bucket width
        #[arg(long, default_value = "1.0")]
        co_action_resolution: f64,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ripple=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Simulate {
            input,
            rate,
            max_depth,
            rounds,
            exhaustive,
            seed,
            buckets,
            json,
            report,
        } => {
            let (model, build) = load_model(&config, &input, !json)?;

            let rounds = if exhaustive { None } else { rounds.or(config.rounds) };
            let params = SimulationParameters {
                avg_retweet_rate: rate.unwrap_or(config.retweet_rate),
                max_depth: max_depth.unwrap_or(config.max_depth),
                mode: match rounds {
                    Some(rounds) => SimulationMode::Sampled { rounds },
                    None => SimulationMode::Exhaustive,
                },
            };
            let boundaries = match buckets {
                Some(raw) => parse_list(&raw)?,
                None => config.bucket_boundaries.clone(),
            };

            let seed = resolve_seed(seed.or(config.seed));
            let run = ripple::pipeline::simulate::run(
                &model,
                random::seeded(seed),
                seed,
                &params,
                &boundaries,
                !json,
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                ripple::output::terminal::display_run_report(&run);
            }

            if let Some(path) = report {
                let written = ripple::output::markdown::generate_report(&run, &build, &path)?;
                if !json {
                    println!(
                        "\n{}",
                        format!("Markdown report saved to: {written}").bold()
                    );
                }
            }
        }

        Commands::Sweep {
            input,
            rates,
            depths,
            rounds,
            seed,
            json,
        } => {
            let (model, _) = load_model(&config, &input, !json)?;
            let rates: Vec<f64> = parse_list(&rates)?;
            let depths: Vec<usize> = parse_list(&depths)?;
            let mode = match rounds.or(config.rounds) {
                Some(rounds) => SimulationMode::Sampled { rounds },
                None => SimulationMode::Exhaustive,
            };

            let seed = resolve_seed(seed.or(config.seed));
            let points = ripple::pipeline::sweep::run(
                &model,
                random::seeded(seed),
                &rates,
                &depths,
                mode,
                !json,
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                ripple::output::terminal::display_sweep(&points);
                println!("\n  Seed: {}", seed.to_string().dimmed());
            }
        }

        Commands::Inspect {
            input,
            engagement_resolution,
            follower_resolution,
            co_action_resolution,
        } => {
            let (model, _) = load_model(&config, &input, true)?;
            let engagement = ripple::stats::engagement_histogram(&model, engagement_resolution)?;
            let followers = ripple::stats::follower_histogram(&model, follower_resolution)?;
            let co_action = ripple::stats::co_action_histogram(&model, co_action_resolution)?;
            ripple::output::terminal::display_model_overview(
                &model,
                &engagement,
                &followers,
                &co_action,
            );
        }
    }

    Ok(())
}

/// Read both input files and build the model, CLI paths overriding config.
fn load_model(config: &Config, input: &InputArgs, verbose: bool) -> Result<(Model, BuildReport)> {
    let activity_path = input.activity.as_ref().unwrap_or(&config.activity_file);
    let interaction_path = input
        .interactions
        .as_ref()
        .unwrap_or(&config.interaction_file);

    if verbose {
        println!(
            "Loading data from {} and {}...",
            activity_path.display(),
            interaction_path.display()
        );
    }

    let activity = ripple::ingest::load_activity(activity_path)?;
    let interactions = ripple::ingest::load_interactions(interaction_path)?;
    let (model, build) = Model::build(activity, interactions)?;

    if verbose {
        ripple::output::terminal::display_build_report(&build);
    }
    Ok((model, build))
}

/// Use the configured seed, or draw one and log it so the run can be repeated.
fn resolve_seed(configured: Option<u64>) -> u64 {
    match configured {
        Some(seed) => seed,
        None => {
            let seed = random::fresh_seed();
            info!(seed, "No seed configured, drew a fresh one");
            seed
        }
    }
}
