//! Error types for vsohash.

use thiserror::Error;

/// Errors that can occur while computing a content identifier.
#[derive(Debug, Error)]
pub enum HashError {
    /// An I/O error occurred while reading input data or spawning workers.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The hasher was already finalized.
    #[error("hasher already finalized: {operation} is not allowed")]
    Finalized {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// A page digest never arrived because its worker stopped.
    #[error("worker pool failed before a page digest was delivered")]
    WorkerFailed,

    /// A content identifier could not be parsed.
    #[error("invalid content id: {message}")]
    InvalidContentId {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl From<HashError> for std::io::Error {
    fn from(e: HashError) -> Self {
        match e {
            HashError::Io(e) => e,
            other => std::io::Error::other(other),
        }
    }
}
