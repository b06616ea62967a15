//! Crate error type.

/// Errors reported by the optimization engine.
///
/// Objective evaluation itself never fails from the engine's point of
/// view: problems map evaluator failures to sentinel objective values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid problem definition: {0}")]
    InvalidProblem(String),

    #[error("invalid seed population: {0}")]
    InvalidSeed(String),

    #[error("algorithm must be initialized before stepping")]
    NotInitialized,

    #[error("algorithm has already been initialized")]
    AlreadyInitialized,

    #[error("algorithm has terminated")]
    Terminated,
}
