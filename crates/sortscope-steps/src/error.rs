//! Error types for sortscope-steps.

use thiserror::Error;

/// Result type for sortscope-steps operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when resolving an algorithm identifier.
///
/// Step generation itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The name does not match any catalogued algorithm.
    #[error("unknown sorting algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// Catalog lookup by position went past the end.
    #[error("no algorithm at catalog position {0}")]
    AlgorithmIndexOutOfRange(usize),
}
