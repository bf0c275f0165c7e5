//! Error handling for the matching engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Job store error: {0}")]
    JobStore(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

impl MatcherError {
    /// True for caller input problems (never worth retrying)
    pub fn is_input_error(&self) -> bool {
        matches!(self, MatcherError::MissingInput(_))
    }
}
