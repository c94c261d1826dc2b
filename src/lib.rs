// Ripple: retweet cascade simulation over interaction-inferred social graphs.
//
// This is the library root. Each module corresponds to a major subsystem
// of the simulation pipeline.

pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod simulation;
pub mod stats;

pub use error::ModelError;
pub use model::{ActivityRecord, BuildReport, InteractionRecord, Model};
