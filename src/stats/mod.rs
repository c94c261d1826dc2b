// Result aggregation and model diagnostics.

pub mod aggregate;
pub mod histogram;

pub use aggregate::{average_outcome, bucket_distribution, Summary};
pub use histogram::{
    co_action_histogram, engagement_histogram, follower_histogram, CoActionHistogram, Histogram,
};
