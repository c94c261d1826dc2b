// Core error type for model building, simulation and aggregation.
//
// Recoverable data problems (duplicate users, duplicate interaction pairs,
// interactions pointing at unknown origins) never reach this enum. They are
// resolved in place and reported through tracing and the build report.

/// Failures of the cascade engine that a caller has to handle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Ingestion produced no users, so there is nothing to seed a cascade from.
    #[error("model has no users; check the activity file")]
    EmptyModel,

    /// An aggregate was requested over zero values.
    #[error("cannot aggregate an empty set of outcomes")]
    EmptyInput,

    /// Bucket boundaries must be strictly ascending.
    #[error("bucket boundaries are not strictly ascending at position {index}")]
    UnorderedBoundaries { index: usize },

    /// Simulation parameters outside their allowed range.
    #[error("invalid simulation parameters: {0}")]
    InvalidParameters(String),

    /// Histogram bucket width that cannot partition the value range.
    #[error("invalid histogram resolution: {0}")]
    InvalidResolution(String),
}
