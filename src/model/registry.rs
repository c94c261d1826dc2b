// User registry — baseline activity per user and the follower view.
//
// Each user carries their average daily retweet count as read from the
// activity file. After `finalize`, every user also carries an engagement
// factor: their count divided by the population mean, so the factors
// average to exactly 1.0 across the registry.

use std::collections::HashMap;

/// A single known user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    /// Average number of retweets per day, straight from the activity file
    pub avg_daily_retweets: u64,
    /// `avg_daily_retweets` relative to the population mean (0.0 until finalized)
    pub engagement_factor: f64,
    /// Ids observed reposting this user, in first-observed order
    pub followers: Vec<u64>,
}

/// All active users, keyed by id, with insertion order preserved.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: HashMap<u64, User>,
    order: Vec<u64>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user or overwrite the baseline count of an existing one.
    ///
    /// Returns `true` when an existing entry was overwritten. Insertion
    /// order is recorded on the first registration only, and the
    /// follower list of an overwritten user is kept.
    pub fn register(&mut self, id: u64, avg_daily_retweets: u64) -> bool {
        match self.users.get_mut(&id) {
            Some(user) => {
                user.avg_daily_retweets = avg_daily_retweets;
                true
            }
            None => {
                self.users.insert(
                    id,
                    User {
                        avg_daily_retweets,
                        ..User::default()
                    },
                );
                self.order.push(id);
                false
            }
        }
    }

    /// Record that `follower` reposted `origin`.
    ///
    /// Dropped silently when `origin` is not registered: an unregistered
    /// user is treated as inactive and stays out of the graph. Returns
    /// whether the edge was added.
    ///
    /// The edge is appended as-is. Callers feed each (origin, follower)
    /// pair once; [`crate::model::Model::build`] does so by only adding
    /// the edge for a pair the interaction graph had not seen before.
    pub fn add_follower_edge(&mut self, origin: u64, follower: u64) -> bool {
        let Some(user) = self.users.get_mut(&origin) else {
            return false;
        };
        user.followers.push(follower);
        true
    }

    /// Compute every user's engagement factor in one pass.
    pub fn finalize(&mut self) {
        if self.users.is_empty() {
            return;
        }
        // u128 so that counts near u64::MAX cannot wrap the sum
        let total: u128 = self
            .users
            .values()
            .map(|u| u128::from(u.avg_daily_retweets))
            .sum();
        let mean = total as f64 / self.users.len() as f64;

        for user in self.users.values_mut() {
            // A population that never retweets has no meaningful mean
            user.engagement_factor = if mean > 0.0 {
                user.avg_daily_retweets as f64 / mean
            } else {
                0.0
            };
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.users.contains_key(&id)
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }

    /// Engagement factor of `id`, or 0.0 for an unknown user.
    pub fn engagement_factor(&self, id: u64) -> f64 {
        self.users.get(&id).map_or(0.0, |u| u.engagement_factor)
    }

    /// Followers of `id`; empty for an unknown user.
    pub fn followers(&self, id: u64) -> &[u64] {
        self.users
            .get(&id)
            .map(|u| u.followers.as_slice())
            .unwrap_or(&[])
    }

    /// Registered ids in the order they were first seen.
    pub fn ids(&self) -> &[u64] {
        &self.order
    }

    /// Users in insertion order.
    pub fn users(&self) -> impl Iterator<Item = (u64, &User)> {
        self.order
            .iter()
            .filter_map(|id| self.users.get(id).map(|u| (*id, u)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
