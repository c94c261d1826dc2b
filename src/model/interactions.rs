// Interaction graph — who reposts whom, and how often.
//
// Keyed by reposter first, then origin. Probabilities are conditional on
// the reposter: for one reposter, the share of their retweets that came
// from each origin. Summed over a reposter's origins they give 1.0.

use std::collections::HashMap;

/// One directed origin -> reposter edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interaction {
    pub retweet_count: u64,
    /// Share of the reposter's retweets taken from this origin (0.0 until finalized)
    pub retweet_probability: f64,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionGraph {
    by_reposter: HashMap<u64, HashMap<u64, Interaction>>,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the retweet count for `origin -> reposter`.
    ///
    /// Returns `true` when a previous count for the same pair was replaced.
    pub fn record_interaction(&mut self, origin: u64, reposter: u64, count: u64) -> bool {
        let origins = self.by_reposter.entry(reposter).or_default();
        match origins.get_mut(&origin) {
            Some(existing) => {
                existing.retweet_count = count;
                true
            }
            None => {
                origins.insert(
                    origin,
                    Interaction {
                        retweet_count: count,
                        retweet_probability: 0.0,
                    },
                );
                false
            }
        }
    }

    /// Derive each reposter's distribution over the origins they retweet.
    pub fn finalize(&mut self) {
        for origins in self.by_reposter.values_mut() {
            let total: u128 = origins
                .values()
                .map(|i| u128::from(i.retweet_count))
                .sum();
            for interaction in origins.values_mut() {
                interaction.retweet_probability = if total > 0 {
                    interaction.retweet_count as f64 / total as f64
                } else {
                    0.0
                };
            }
        }
    }

    /// Probability that `reposter` retweets `origin`, given they retweet at all.
    ///
    /// 0.0 when the reposter never retweeted this origin.
    pub fn retweet_probability(&self, origin: u64, reposter: u64) -> f64 {
        self.get(origin, reposter)
            .map_or(0.0, |i| i.retweet_probability)
    }

    pub fn retweet_count(&self, origin: u64, reposter: u64) -> u64 {
        self.get(origin, reposter).map_or(0, |i| i.retweet_count)
    }

    pub fn get(&self, origin: u64, reposter: u64) -> Option<&Interaction> {
        self.by_reposter.get(&reposter)?.get(&origin)
    }

    /// Origins retweeted by `reposter`, in no particular order.
    pub fn origins_of(&self, reposter: u64) -> impl Iterator<Item = (u64, &Interaction)> {
        self.by_reposter
            .get(&reposter)
            .into_iter()
            .flat_map(|origins| origins.iter().map(|(id, i)| (*id, i)))
    }

    /// Reposters that have at least one tracked origin.
    pub fn reposters(&self) -> impl Iterator<Item = u64> + '_ {
        self.by_reposter.keys().copied()
    }

    pub fn reposter_count(&self) -> usize {
        self.by_reposter.len()
    }

    pub fn edge_count(&self) -> usize {
        self.by_reposter.values().map(HashMap::len).sum()
    }
}
