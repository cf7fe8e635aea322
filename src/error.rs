//! Errors raised by the toolkit itself (as opposed to errors reported by caller operations).
//!
//! These travel inside [`anyhow::Error`] like every other failure; match on them with
//! `err.downcast_ref::<FlowError>()`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// A serial step whose shape does not fit its position in the chain.
    #[error("step {index} is not a valid operation here (expected a {expected} step)")]
    InvalidStep {
        index: usize,
        expected: &'static str,
    },
    /// Concurrency cap below 1.
    #[error("concurrency limit must be at least 1, got {limit}")]
    InvalidLimit { limit: usize },
    /// Adapter input was absent or falsy.
    #[error("missing input")]
    MissingInput,
    /// A completion handle was dropped without reporting an outcome.
    #[error("operation dropped its completion handle without reporting an outcome")]
    Abandoned,
}
