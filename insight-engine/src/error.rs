//! Error types for the insight boundary

use thiserror::Error;

/// Result type for insight operations
pub type Result<T> = std::result::Result<T, Error>;

/// Insight boundary errors
#[derive(Error, Debug)]
pub enum Error {
    /// The external completion call failed
    #[error("Completion transport error: {0}")]
    Transport(String),

    /// The collaborator returned JSON that does not match the expected shape
    #[error("Malformed insight response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Malformed(err.to_string())
    }
}
