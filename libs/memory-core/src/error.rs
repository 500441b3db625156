//! Error types for memory-core.

use thiserror::Error;

/// Result type alias using SetError.
pub type Result<T> = std::result::Result<T, SetError>;

/// Errors raised while validating learning set input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    #[error("set name must not be empty")]
    EmptyName,

    #[error("pair {index} has an empty question or answer")]
    EmptyPair { index: usize },

    #[error("a playable set needs at least {required} pairs, got {actual}")]
    TooFewPairs { required: usize, actual: usize },
}
