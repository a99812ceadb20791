use thiserror::Error;

/// Unified error type for repo-miner operations
#[derive(Error, Debug)]
pub enum MinerError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Issue tracker error: {0}")]
    Tracker(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in repo-miner
pub type Result<T> = std::result::Result<T, MinerError>;

impl MinerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MinerError::Config(msg.into())
    }

    /// Create a retrieval error with context
    pub fn retrieval(msg: impl Into<String>) -> Self {
        MinerError::Retrieval(msg.into())
    }

    /// Create a tracker error with context
    pub fn tracker(msg: impl Into<String>) -> Self {
        MinerError::Tracker(msg.into())
    }
}
