//! Error types for the integrity ledger

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// IO error (chain file, directories)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chain file exists but cannot be decoded
    ///
    /// Deliberately distinct from an absent file, which is recovered
    /// silently with a fresh genesis block.
    #[error("Corrupt chain file: {0}")]
    CorruptChain(String),

    /// Persisted chain failed the integrity check at startup
    #[error("Chain integrity check failed: {0}")]
    ChainIntegrity(String),

    /// Nonce search hit the iteration cap without meeting the target
    #[error("Mining exhausted after {iterations} iterations at difficulty {difficulty}")]
    MiningExhausted {
        /// Iterations spent before giving up
        iterations: u64,
        /// Difficulty that was being targeted
        difficulty: usize,
    },

    /// Contract error (unknown contract, bad conditions)
    #[error("Contract error: {0}")]
    Contract(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metrics registration error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<prometheus::Error> for Error {
    fn from(err: prometheus::Error) -> Self {
        Error::Metrics(err.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
