// Spread model — the immutable snapshot every cascade runs against.
//
// Built once from the two ingestion streams: activity records register
// users, interaction records add retweet edges plus the transposed
// follower edge. Both halves are finalized before the model is handed out,
// and nothing mutates it afterwards.

pub mod interactions;
pub mod registry;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ModelError;
use interactions::InteractionGraph;
use registry::UserRegistry;

/// One line of the activity file: a user and their average daily retweets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityRecord {
    pub user_id: u64,
    pub avg_daily_retweets: u64,
}

/// One line of the interaction file: `reposter` retweeted `origin` `retweet_count` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionRecord {
    pub reposter_id: u64,
    pub origin_id: u64,
    pub retweet_count: u64,
}

/// What happened while building a model, for display and sanity checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub users: usize,
    pub interactions: usize,
    pub duplicate_users: usize,
    pub duplicate_interactions: usize,
    /// Interaction records whose origin was never registered as active
    pub dangling_interactions: usize,
}

/// Registry and interaction graph, finalized and read-only.
#[derive(Debug, Clone)]
pub struct Model {
    registry: UserRegistry,
    interactions: InteractionGraph,
}

impl Model {
    /// Assemble and finalize a model from ingested records.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyModel`] when no activity record was seen.
    pub fn build<A, I>(activity: A, interactions: I) -> Result<(Self, BuildReport), ModelError>
    where
        A: IntoIterator<Item = ActivityRecord>,
        I: IntoIterator<Item = InteractionRecord>,
    {
        let mut registry = UserRegistry::new();
        let mut graph = InteractionGraph::new();
        let mut report = BuildReport::default();

        for record in activity {
            if registry.register(record.user_id, record.avg_daily_retweets) {
                warn!(
                    user_id = record.user_id,
                    "Duplicate user in activity data, overwriting previous count"
                );
                report.duplicate_users += 1;
            }
        }

        if registry.is_empty() {
            return Err(ModelError::EmptyModel);
        }

        for record in interactions {
            if !registry.contains(record.origin_id) {
                debug!(
                    origin_id = record.origin_id,
                    reposter_id = record.reposter_id,
                    "Dropping interaction with inactive origin"
                );
                report.dangling_interactions += 1;
                continue;
            }
            if graph.record_interaction(record.origin_id, record.reposter_id, record.retweet_count)
            {
                warn!(
                    origin_id = record.origin_id,
                    reposter_id = record.reposter_id,
                    "Duplicate interaction pair, overwriting previous count"
                );
                report.duplicate_interactions += 1;
            } else {
                // First sighting of this pair, so the follower list stays unique
                registry.add_follower_edge(record.origin_id, record.reposter_id);
            }
        }

        registry.finalize();
        graph.finalize();

        report.users = registry.len();
        report.interactions = graph.edge_count();
        info!(
            users = report.users,
            interactions = report.interactions,
            dangling = report.dangling_interactions,
            "Spread model built"
        );

        Ok((
            Self {
                registry,
                interactions: graph,
            },
            report,
        ))
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn interactions(&self) -> &InteractionGraph {
        &self.interactions
    }

    /// Seed pool: every registered id in activity-file order.
    pub fn candidate_ids(&self) -> &[u64] {
        self.registry.ids()
    }

    pub fn engagement_factor(&self, id: u64) -> f64 {
        self.registry.engagement_factor(id)
    }

    pub fn followers(&self, id: u64) -> &[u64] {
        self.registry.followers(id)
    }

    pub fn retweet_probability(&self, origin: u64, reposter: u64) -> f64 {
        self.interactions.retweet_probability(origin, reposter)
    }

    pub fn user_count(&self) -> usize {
        self.registry.len()
    }
}
