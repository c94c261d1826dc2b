// Ingestion — read the activity and interaction files into records.
//
// Both files are plain text, one record per line, whitespace separated:
//
//   activity:     <user_id> <avg_daily_retweets>
//   interactions: <reposter_id> <origin_id> <retweet_count>
//
// Blank lines and `#` comments are ignored. Malformed lines are skipped
// with a warning so one bad row never sinks a whole dataset.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::model::{ActivityRecord, InteractionRecord};

/// Parse one activity line. `None` for blank, comment, or malformed lines.
pub fn parse_activity_line(line: &str) -> Option<ActivityRecord> {
    let [user_id, avg_daily_retweets] = parse_fields::<2>(line)?;
    Some(ActivityRecord {
        user_id,
        avg_daily_retweets,
    })
}

/// Parse one interaction line. `None` for blank, comment, or malformed lines.
pub fn parse_interaction_line(line: &str) -> Option<InteractionRecord> {
    let [reposter_id, origin_id, retweet_count] = parse_fields::<3>(line)?;
    Some(InteractionRecord {
        reposter_id,
        origin_id,
        retweet_count,
    })
}

/// Exactly `N` unsigned integers separated by whitespace.
fn parse_fields<const N: usize>(line: &str) -> Option<[u64; N]> {
    let mut fields = [0u64; N];
    let mut tokens = line.split_whitespace();
    for slot in fields.iter_mut() {
        *slot = tokens.next()?.parse().ok()?;
    }
    if tokens.next().is_some() {
        return None;
    }
    Some(fields)
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Read every line of `reader`, parsing with `parse` and warning on rejects.
pub fn read_records<R, T, F>(reader: R, source: &str, parse: F) -> Result<Vec<T>>
where
    R: BufRead,
    F: Fn(&str) -> Option<T>,
{
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {} of {source}", index + 1))?;
        if is_skippable(&line) {
            continue;
        }
        match parse(&line) {
            Some(record) => records.push(record),
            None => {
                warn!(source, line = index + 1, content = %line.trim(), "Skipping malformed line");
                skipped += 1;
            }
        }
    }

    info!(source, records = records.len(), skipped, "Records loaded");
    Ok(records)
}

pub fn load_activity(path: &Path) -> Result<Vec<ActivityRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open activity file {}", path.display()))?;
    read_records(
        BufReader::new(file),
        &path.display().to_string(),
        parse_activity_line,
    )
}

pub fn load_interactions(path: &Path) -> Result<Vec<InteractionRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open interaction file {}", path.display()))?;
    read_records(
        BufReader::new(file),
        &path.display().to_string(),
        parse_interaction_line,
    )
}
