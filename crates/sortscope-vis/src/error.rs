//! Error types for sortscope-vis.

use thiserror::Error;

/// Result type for sortscope-vis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the playback core.
///
/// Playback itself has no failure path; these cover configuration loading
/// and the server boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Algorithm lookup failed
    #[error(transparent)]
    Steps(#[from] sortscope_steps::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
