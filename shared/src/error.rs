//! Error types for NutriGuide Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in NutriGuide Lambda functions.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any upstream call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The generative model could not be reached or did not complete
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The generative model replied with something outside the declared shape
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Upstream(_) | Error::MalformedOutput(_) => 502,
            _ => 500,
        }
    }
}
