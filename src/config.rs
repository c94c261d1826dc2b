use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::stats::aggregate::DEFAULT_BOUNDARIES;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Every value can be
/// overridden by the matching command-line flag.
#[derive(Debug, Clone)]
pub struct Config {
    /// Activity file: `<user_id> <avg_daily_retweets>` per line
    pub activity_file: PathBuf,
    /// Interaction file: `<reposter_id> <origin_id> <retweet_count>` per line
    pub interaction_file: PathBuf,
    pub retweet_rate: f64,
    pub max_depth: usize,
    /// Sampled-mode round count; unset means exhaustive
    pub rounds: Option<usize>,
    /// Seed for the process-wide generator; a fresh one is drawn and logged when unset
    pub seed: Option<u64>,
    pub bucket_boundaries: Vec<usize>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are errors.
    pub fn load() -> Result<Self> {
        Ok(Self {
            activity_file: env::var("RIPPLE_ACTIVITY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("active_rate.txt")),
            interaction_file: env::var("RIPPLE_INTERACTION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("user_interaction_rate.txt")),
            retweet_rate: parse_var("RIPPLE_RETWEET_RATE")?.unwrap_or(0.05),
            max_depth: parse_var("RIPPLE_MAX_DEPTH")?.unwrap_or(3),
            rounds: parse_var("RIPPLE_ROUNDS")?,
            seed: parse_var("RIPPLE_SEED")?,
            bucket_boundaries: match env::var("RIPPLE_BUCKETS") {
                Ok(raw) => parse_list(&raw).context("RIPPLE_BUCKETS")?,
                Err(_) => DEFAULT_BOUNDARIES.to_vec(),
            },
        })
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(None),
    }
}

/// Parse a comma-separated list such as `1,2,5,10`.
pub fn parse_list<T>(raw: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .with_context(|| format!("invalid list element {s:?}"))
        })
        .collect()
}
