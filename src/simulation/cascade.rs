// Cascade simulator — randomized, depth-bounded retweet propagation.
//
// A cascade starts when the seed decides to post (probability scaled by
// their engagement factor). Each follower then retweets with probability
//
//   avg_retweet_rate * engagement_factor(follower) * retweet_probability(post, follower)
//
// where `post` is the user the follower saw the message from, not the
// original seed. Every user is counted at most once per cascade, and no
// branch goes deeper than `max_depth` follower layers.

use std::collections::HashSet;

use tracing::{debug, info};

use super::params::{SimulationMode, SimulationParameters};
use super::random::RandomSource;
use crate::error::ModelError;
use crate::model::Model;

/// A pending retweet decision: `follower` has seen `post_id`'s retweet.
struct Frame {
    post_id: u64,
    follower_id: u64,
    depth: usize,
}

/// Runs cascades over a shared, read-only model.
pub struct Simulator<'a, R> {
    model: &'a Model,
    source: R,
}

impl<'a, R: RandomSource> Simulator<'a, R> {
    pub fn new(model: &'a Model, source: R) -> Self {
        Self { model, source }
    }

    /// Run every cascade the parameters call for and return their sizes.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParameters`] when the parameters fail validation,
    /// [`ModelError::EmptyModel`] when there is no seed to draw from.
    pub fn run(&mut self, params: &SimulationParameters) -> Result<Vec<usize>, ModelError> {
        self.run_observed(params, |_| {})
    }

    /// Like [`Simulator::run`], calling `observer` with each outcome as it lands.
    pub fn run_observed<F>(
        &mut self,
        params: &SimulationParameters,
        mut observer: F,
    ) -> Result<Vec<usize>, ModelError>
    where
        F: FnMut(usize),
    {
        params.validate()?;
        let model = self.model;
        let candidates = model.candidate_ids();
        if candidates.is_empty() {
            return Err(ModelError::EmptyModel);
        }

        info!(
            rate = params.avg_retweet_rate,
            max_depth = params.max_depth,
            mode = ?params.mode,
            "Starting simulation"
        );

        let outcomes: Vec<usize> = match params.mode {
            SimulationMode::Exhaustive => candidates
                .iter()
                .map(|&seed| {
                    let outcome = self.simulate_from(seed, params);
                    observer(outcome);
                    outcome
                })
                .collect(),
            SimulationMode::Sampled { rounds } => (0..rounds)
                .map(|_| {
                    let seed = candidates[self.source.next_index(candidates.len())];
                    let outcome = self.simulate_from(seed, params);
                    observer(outcome);
                    outcome
                })
                .collect(),
        };

        info!(cascades = outcomes.len(), "Simulation finished");
        Ok(outcomes)
    }

    /// Simulate a single cascade from `seed_id`; returns the number of
    /// distinct users who retweeted, seed included (0 if it never started).
    pub fn simulate_from(&mut self, seed_id: u64, params: &SimulationParameters) -> usize {
        let model = self.model;
        let start_rate = params.avg_retweet_rate * model.engagement_factor(seed_id);
        if self.source.next_unit() >= start_rate {
            return 0;
        }

        let mut visited: HashSet<u64> = HashSet::from([seed_id]);
        let mut stack: Vec<Frame> = Vec::new();
        push_followers(&mut stack, model, seed_id, 1);

        while let Some(frame) = stack.pop() {
            if frame.depth > params.max_depth || visited.contains(&frame.follower_id) {
                continue;
            }

            let rate = params.avg_retweet_rate
                * model.engagement_factor(frame.follower_id)
                * model.retweet_probability(frame.post_id, frame.follower_id);

            if self.source.next_unit() < rate {
                visited.insert(frame.follower_id);
                push_followers(&mut stack, model, frame.follower_id, frame.depth + 1);
            }
        }

        debug!(seed_id, size = visited.len(), "Cascade finished");
        visited.len()
    }
}

/// Schedule `post_id`'s followers so they pop in follower-list order.
fn push_followers(stack: &mut Vec<Frame>, model: &Model, post_id: u64, depth: usize) {
    stack.extend(model.followers(post_id).iter().rev().map(|&follower_id| Frame {
        post_id,
        follower_id,
        depth,
    }));
}
